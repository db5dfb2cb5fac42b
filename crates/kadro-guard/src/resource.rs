//! Resource-tenant confirmation.
//!
//! A composable, per-route check for handlers whose requests name an
//! organization explicitly in the path or query string: if the named
//! organization differs from the authenticated caller's, the request is
//! rejected and the attempt is logged for audit. Absence of an explicit
//! identifier is not an error; downstream handlers scope their own
//! queries with the attached [`AuthContext`].
//!
//! This guard cannot retrofit tenant scoping into a domain query that
//! forgot its filter; it only guarantees an explicitly supplied identifier
//! never diverges from the caller's tenant.

use std::collections::HashMap;

use axum::body::Body;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, Request};
use axum::middleware::Next;
use axum::response::Response;
use kadro_core::OrgId;

use crate::context::AuthContext;
use crate::error::GuardError;

/// Name of the path/query parameter carrying an explicit organization id.
pub const ORG_PARAM: &str = "org_id";

/// Check an explicitly claimed organization against the caller's.
///
/// Handlers that receive the identifier in a request body call this
/// directly; the middleware variant covers path and query parameters.
///
/// # Errors
///
/// Returns `GuardError::CrossTenantAccessDenied` on mismatch, after
/// logging the attempt with full identifying context.
pub fn confirm_resource_org(context: &AuthContext, claimed: &OrgId) -> Result<(), GuardError> {
    if claimed != &context.org_id {
        tracing::warn!(
            target: "audit",
            subject = %context.external_id,
            user_id = %context.user_id,
            credential_org = %context.org_id,
            attempted_org = %claimed,
            "cross-tenant access denied"
        );
        return Err(GuardError::CrossTenantAccessDenied);
    }
    Ok(())
}

/// Resource-tenant confirmation middleware.
///
/// Layer per-route, inside [`crate::gate::auth_gate`] so the context is
/// already attached. Reads `org_id` from path parameters first, then the
/// query string; when neither names an organization the request passes
/// through untouched.
pub async fn resource_org_guard(
    path: Option<Path<HashMap<String, String>>>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, GuardError> {
    let context = request
        .extensions()
        .get::<AuthContext>()
        .cloned()
        .ok_or(GuardError::MissingCredential)?;

    let claimed = path
        .as_ref()
        .and_then(|Path(params)| params.get(ORG_PARAM))
        .or_else(|| query.as_ref().ok().and_then(|Query(params)| params.get(ORG_PARAM)));

    if let Some(claimed) = claimed {
        confirm_resource_org(&context, &OrgId::from(claimed.as_str()))?;
    }

    Ok(next.run(request).await)
}
