//! Verified per-request identity and tenant context.

use kadro_auth::SessionClaims;
use kadro_core::{OrgId, SubjectId, UserId};

/// The verified identity attached to a request once the gate admits it.
///
/// Downstream handlers read this from request extensions instead of
/// re-verifying the credential; the organization identifier here is the
/// only tenant a handler may touch.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Local user identifier.
    pub user_id: UserId,

    /// External identity-provider subject identifier.
    pub external_id: SubjectId,

    /// The caller's organization.
    pub org_id: OrgId,

    /// Email address from the credential.
    pub email: String,

    /// First name from the credential.
    pub first_name: String,

    /// Last name from the credential.
    pub last_name: String,

    /// Role name within the organization.
    pub role: String,
}

impl AuthContext {
    /// Build a context from verified claims.
    ///
    /// Returns `None` when the `sub` claim is not a local user identifier,
    /// i.e. a credential of some other shape that happens to verify.
    #[must_use]
    pub fn from_claims(claims: &SessionClaims) -> Option<Self> {
        Some(Self {
            user_id: claims.user_id()?,
            external_id: claims.subject_id(),
            org_id: claims.org_id(),
            email: claims.email.clone(),
            first_name: claims.first_name.clone(),
            last_name: claims.last_name.clone(),
            role: claims.role.clone(),
        })
    }
}
