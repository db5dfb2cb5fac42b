//! Error types for the provisioning engine.

use kadro_core::OrgId;
use kadro_db::DbError;
use thiserror::Error;

/// Errors produced while provisioning users from identity-provider events.
///
/// `MissingTenantContext` and `UnknownOrInactiveOrganization` are deliberately
/// separate variants: a payload that never named an organization and a payload
/// that named one we refuse are different operational signals.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// No email address could be resolved from the external user.
    ///
    /// Terminal for the event; no partial user is created.
    #[error("external user carries no resolvable email address")]
    MissingEmail,

    /// The external user's metadata names no organization.
    ///
    /// Provisioning without a known tenant is never permitted: no
    /// auto-creation of organizations, no default-tenant fallback.
    #[error("external user metadata carries no organization identifier")]
    MissingTenantContext,

    /// The named organization does not exist or is inactive.
    #[error("organization {0} is unknown or inactive")]
    UnknownOrInactiveOrganization(OrgId),

    /// Employee code generation kept colliding past the retry ceiling.
    #[error("employee code generation exhausted after {attempts} attempts")]
    CodeGenerationExhausted {
        /// Number of attempts made before giving up.
        attempts: u32,
    },

    /// A recognized event type carried a payload we could not decode.
    #[error("malformed event payload: {0}")]
    MalformedEvent(String),

    /// A database operation failed.
    #[error(transparent)]
    Db(#[from] DbError),
}
