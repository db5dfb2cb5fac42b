//! Session credential claims.
//!
//! The claim set embedded in every issued session credential. Alongside the
//! standard `sub`/`exp`/`iat` claims it carries kadro-specific context:
//! the external subject identifier, the caller's organization, and profile
//! fields used by downstream handlers without a database round-trip.
//!
//! The organization identifier is a non-optional field: a claim set cannot
//! be constructed without one, so issuing a credential that lacks tenant
//! context is a compile-time impossibility rather than a runtime check.

use chrono::Utc;
use kadro_core::{OrgId, SubjectId, UserId};
use serde::{Deserialize, Serialize};

/// Claims carried by a session credential.
///
/// # Example
///
/// ```
/// use kadro_auth::SessionClaims;
/// use kadro_core::{OrgId, UserId};
///
/// let claims = SessionClaims::builder(OrgId::from("org_1"))
///     .subject(UserId::new())
///     .external_subject("user_2a9x8b7c")
///     .email("a@x.com")
///     .role("employee")
///     .build();
///
/// assert_eq!(claims.org, "org_1");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject - the local user identifier.
    pub sub: String,

    /// External identity-provider subject identifier.
    pub ext: String,

    /// Organization identifier. Always present; a credential whose claims
    /// lack this field fails deserialization and is rejected outright.
    pub org: String,

    /// User's email address.
    pub email: String,

    /// User's first name.
    pub first_name: String,

    /// User's last name.
    pub last_name: String,

    /// Role name within the organization.
    pub role: String,

    /// Expiration time as Unix timestamp. Stamped at issuance.
    pub exp: i64,

    /// Issued at as Unix timestamp.
    pub iat: i64,
}

impl SessionClaims {
    /// Create a builder for a claim set scoped to the given organization.
    #[must_use]
    pub fn builder(org: OrgId) -> SessionClaimsBuilder {
        SessionClaimsBuilder {
            org,
            sub: None,
            ext: None,
            email: None,
            first_name: None,
            last_name: None,
            role: None,
            exp: None,
            iat: None,
        }
    }

    /// Check if the claims are expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Get the organization identifier as a typed id.
    #[must_use]
    pub fn org_id(&self) -> OrgId {
        OrgId::from(self.org.as_str())
    }

    /// Get the external subject identifier as a typed id.
    #[must_use]
    pub fn subject_id(&self) -> SubjectId {
        SubjectId::from(self.ext.as_str())
    }

    /// Parse the local user identifier from the `sub` claim.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.sub.parse().ok()
    }
}

/// Builder for [`SessionClaims`].
#[derive(Debug)]
pub struct SessionClaimsBuilder {
    org: OrgId,
    sub: Option<String>,
    ext: Option<String>,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    role: Option<String>,
    exp: Option<i64>,
    iat: Option<i64>,
}

impl SessionClaimsBuilder {
    /// Set the local user identifier.
    #[must_use]
    pub fn subject(mut self, sub: UserId) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set the external subject identifier.
    #[must_use]
    pub fn external_subject(mut self, ext: impl Into<String>) -> Self {
        self.ext = Some(ext.into());
        self
    }

    /// Set the email address.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the first name.
    #[must_use]
    pub fn first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    /// Set the last name.
    #[must_use]
    pub fn last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = Some(name.into());
        self
    }

    /// Set the role name.
    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the expiration time as a Unix timestamp.
    ///
    /// `issue_credential` overrides this with the standard horizon; setting
    /// it here only matters for callers that encode the claims directly.
    #[must_use]
    pub fn expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set the issued-at time.
    #[must_use]
    pub fn issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Build the claim set.
    ///
    /// Unset profile fields default to empty strings; `exp` defaults to one
    /// hour from now (callers normally go through `issue_credential`, which
    /// stamps the real horizon).
    #[must_use]
    pub fn build(self) -> SessionClaims {
        let now = Utc::now().timestamp();

        SessionClaims {
            sub: self.sub.unwrap_or_default(),
            ext: self.ext.unwrap_or_default(),
            org: self.org.as_str().to_string(),
            email: self.email.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            role: self.role.unwrap_or_default(),
            exp: self.exp.unwrap_or(now + 3600),
            iat: self.iat.unwrap_or(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let user = UserId::new();
        let claims = SessionClaims::builder(OrgId::from("org_1"))
            .subject(user)
            .external_subject("user_abc")
            .email("a@x.com")
            .first_name("Ada")
            .last_name("Lovelace")
            .role("employee")
            .build();

        assert_eq!(claims.org, "org_1");
        assert_eq!(claims.sub, user.to_string());
        assert_eq!(claims.ext, "user_abc");
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.role, "employee");
        assert_eq!(claims.user_id(), Some(user));
    }

    #[test]
    fn test_org_always_present() {
        let claims = SessionClaims::builder(OrgId::from("org_1")).build();
        assert_eq!(claims.org_id(), OrgId::from("org_1"));
    }

    #[test]
    fn test_expiration() {
        let claims = SessionClaims::builder(OrgId::from("org_1"))
            .expiration(Utc::now().timestamp() + 3600)
            .build();
        assert!(!claims.is_expired());

        let claims = SessionClaims::builder(OrgId::from("org_1"))
            .expiration(Utc::now().timestamp() - 3600)
            .build();
        assert!(claims.is_expired());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let claims = SessionClaims::builder(OrgId::from("org_1"))
            .subject(UserId::new())
            .external_subject("user_abc")
            .email("a@x.com")
            .role("employee")
            .build();

        let json = serde_json::to_string(&claims).unwrap();
        let deserialized: SessionClaims = serde_json::from_str(&json).unwrap();

        assert_eq!(claims, deserialized);
    }

    #[test]
    fn test_deserialization_requires_org() {
        // A claim set without the org field must not deserialize.
        let json = r#"{
            "sub": "x", "ext": "y", "email": "a@x.com",
            "first_name": "", "last_name": "", "role": "employee",
            "exp": 1, "iat": 1
        }"#;
        let result: Result<SessionClaims, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_user_id_parse_failure_is_none() {
        let claims = SessionClaims::builder(OrgId::from("org_1")).build();
        assert_eq!(claims.user_id(), None);
    }
}
