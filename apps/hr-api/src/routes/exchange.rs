//! Credential exchange endpoint.
//!
//! Accepts a provider-issued identity assertion and, for a subject we have
//! already provisioned, returns a session credential embedding tenant
//! context plus the public profile. Subjects the webhook flow has not yet
//! reached get "not found"; this endpoint never provisions.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use kadro_auth::{decode_assertion, issue_credential, SessionClaims};
use kadro_guard::bearer_token;
use serde::Serialize;

use crate::routes::error::ApiError;
use crate::state::AppState;

/// Public profile returned alongside the credential.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub employee_code: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub organization_id: String,
    pub organization_name: String,
}

/// Response of a successful exchange.
#[derive(Debug, Serialize)]
pub struct ExchangeResponse {
    pub credential: String,
    pub user: UserProfile,
}

/// `POST /auth/exchange`
pub async fn exchange(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ExchangeResponse>, ApiError> {
    let assertion_token = bearer_token(&headers).ok_or(ApiError::Unauthorized)?;

    let assertion = decode_assertion(assertion_token, &state.provider_public_key).map_err(|e| {
        tracing::warn!(error = %e, "rejected identity assertion");
        ApiError::Unauthorized
    })?;

    let user = state
        .users
        .find_by_external_id(&assertion.subject_id())
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    let organization = state
        .directory
        .find_org(&user.org_id())
        .await?
        .ok_or(ApiError::NotFound("Organization"))?;

    let role_name = state
        .roles
        .find_by_id(user.role_id)
        .await?
        .map(|role| role.name)
        .unwrap_or_default();

    let claims = SessionClaims::builder(user.org_id())
        .subject(user.user_id())
        .external_subject(user.external_id.clone())
        .email(user.email.clone())
        .first_name(user.first_name.clone())
        .last_name(user.last_name.clone())
        .role(role_name.clone())
        .build();

    let credential = issue_credential(claims, &state.session_secret).map_err(|e| {
        tracing::error!(error = %e, "credential issuance failed");
        ApiError::Internal
    })?;

    tracing::info!(user_id = %user.id, org = %user.org_id, "issued session credential");

    Ok(Json(ExchangeResponse {
        credential,
        user: UserProfile {
            id: user.id.to_string(),
            employee_code: user.employee_code,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: role_name,
            organization_id: organization.id,
            organization_name: organization.name,
        },
    }))
}
