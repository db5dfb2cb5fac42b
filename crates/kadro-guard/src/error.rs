//! Error types for the authorization gate.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kadro_db::DbError;
use serde::Serialize;
use thiserror::Error;

/// Errors produced while authorizing a request.
///
/// Authentication failures are 401 with a single stable message; callers
/// cannot tell a bad signature from an expired credential. Tenant failures
/// are explicit 403s; cross-tenant violations in particular are never
/// downgraded to "not found", because the audit trail matters more than
/// obscuring existence for this internal-facing system.
#[derive(Debug, Error)]
pub enum GuardError {
    /// No bearer credential on the request.
    #[error("authentication required")]
    MissingCredential,

    /// The credential failed verification or is expired.
    #[error("invalid or expired credential")]
    InvalidCredential,

    /// The verified claims carry no organization identifier.
    ///
    /// Issuance makes this impossible for our own credentials, but a token
    /// signed by a different version might lack it.
    #[error("credential carries no organization context")]
    MissingTenantContext,

    /// The caller's organization is missing from the directory or inactive.
    ///
    /// Re-checked on every request so deactivation takes effect immediately,
    /// not at next issuance.
    #[error("organization is unknown or inactive")]
    InactiveOrUnknownOrganization,

    /// The request explicitly named a different organization's resources.
    #[error("access to another organization's resources is denied")]
    CrossTenantAccessDenied,

    /// The tenant directory could not be consulted.
    #[error("authorization check failed")]
    Directory(#[source] DbError),
}

/// JSON error response returned by the gate.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status: u16,
}

impl GuardError {
    /// The HTTP status this error maps to.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            GuardError::MissingCredential | GuardError::InvalidCredential => {
                StatusCode::UNAUTHORIZED
            }
            GuardError::MissingTenantContext
            | GuardError::InactiveOrUnknownOrganization
            | GuardError::CrossTenantAccessDenied => StatusCode::FORBIDDEN,
            GuardError::Directory(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            GuardError::MissingCredential => "missing_credential",
            GuardError::InvalidCredential => "invalid_credential",
            GuardError::MissingTenantContext => "missing_tenant_context",
            GuardError::InactiveOrUnknownOrganization => "inactive_organization",
            GuardError::CrossTenantAccessDenied => "cross_tenant_access_denied",
            GuardError::Directory(_) => "internal_error",
        }
    }
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.error_type().to_string(),
            message: self.to_string(),
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}
