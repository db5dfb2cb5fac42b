//! The per-request authorization gate.
//!
//! Each request walks `Unauthenticated → CredentialVerified →
//! TenantConfirmed → Authorized` or is rejected at the first failing step.
//! Credential verification is pure computation; the single suspension point
//! is the tenant directory re-check, which runs on every request so a
//! deactivated organization loses access immediately, even for credentials
//! issued while it was active.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use kadro_auth::verify_credential;
use kadro_db::TenantDirectory;

use crate::context::AuthContext;
use crate::error::GuardError;

/// Shared state for the gate middleware.
#[derive(Clone)]
pub struct GateState {
    secret: Arc<Vec<u8>>,
    directory: Arc<dyn TenantDirectory>,
}

impl GateState {
    /// Create gate state from the session signing secret and the directory.
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>, directory: Arc<dyn TenantDirectory>) -> Self {
        Self {
            secret: Arc::new(secret.into()),
            directory,
        }
    }

    /// The session signing secret.
    #[must_use]
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }
}

/// Extract the bearer token from an `Authorization` header.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}

/// Authorization gate middleware.
///
/// Layer with `axum::middleware::from_fn_with_state`; on success the
/// verified [`AuthContext`] is inserted into request extensions for
/// downstream handlers.
///
/// # Errors
///
/// - 401 `MissingCredential` - no bearer token
/// - 401 `InvalidCredential` - signature or expiry failure
/// - 403 `MissingTenantContext` - verified claims lack an organization
/// - 403 `InactiveOrUnknownOrganization` - directory re-check failed
pub async fn auth_gate(
    State(state): State<GateState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, GuardError> {
    let token = bearer_token(request.headers()).ok_or(GuardError::MissingCredential)?;

    let claims =
        verify_credential(token, state.secret()).map_err(|_| GuardError::InvalidCredential)?;

    // Our issuance path cannot omit the organization, but the claims could
    // originate from a different signer version.
    if claims.org.is_empty() {
        return Err(GuardError::MissingTenantContext);
    }

    let org_id = claims.org_id();
    match state
        .directory
        .find_org(&org_id)
        .await
        .map_err(GuardError::Directory)?
    {
        Some(org) if org.is_active => {}
        _ => {
            tracing::warn!(
                subject = %claims.ext,
                org = %org_id,
                "rejected credential for unknown or inactive organization"
            );
            return Err(GuardError::InactiveOrUnknownOrganization);
        }
    }

    let context = AuthContext::from_claims(&claims).ok_or(GuardError::InvalidCredential)?;
    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}
