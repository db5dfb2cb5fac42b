//! HTTP error mapping for the API handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kadro_db::DbError;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the public API handlers.
///
/// Messages are stable and non-sensitive: no stack traces, no internal
/// identifiers beyond what the caller already supplied.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The presented identity assertion failed validation.
    #[error("invalid identity assertion")]
    Unauthorized,

    /// The referenced resource does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// An unexpected processing failure.
    #[error("internal error")]
    Internal,
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        tracing::error!(error = %err, "database operation failed");
        ApiError::Internal
    }
}

/// JSON error response returned by API endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}
