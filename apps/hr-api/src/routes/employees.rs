//! Authenticated profile and employee listing handlers.
//!
//! Both routes sit behind the authorization gate; the employee listing
//! additionally carries the resource-tenant guard, so the `org_id` in its
//! path can never diverge from the caller's organization by the time the
//! handler runs. The listing still scopes its query by the path parameter
//! it was given.

use axum::extract::{Extension, Path, State};
use axum::Json;
use kadro_core::OrgId;
use kadro_db::models::{User, UserStatus};
use kadro_guard::AuthContext;
use serde::Serialize;

use crate::routes::error::ApiError;
use crate::state::AppState;

/// The caller's own identity, straight from the verified credential.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: String,
    pub external_id: String,
    pub organization_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

/// A tenant-scoped employee listing entry.
#[derive(Debug, Serialize)]
pub struct EmployeeSummary {
    pub id: String,
    pub employee_code: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub status: UserStatus,
}

impl From<User> for EmployeeSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            employee_code: user.employee_code,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            status: user.status,
        }
    }
}

/// `GET /me`
pub async fn me(Extension(context): Extension<AuthContext>) -> Json<MeResponse> {
    Json(MeResponse {
        id: context.user_id.to_string(),
        external_id: context.external_id.to_string(),
        organization_id: context.org_id.to_string(),
        email: context.email,
        first_name: context.first_name,
        last_name: context.last_name,
        role: context.role,
    })
}

/// `GET /orgs/{org_id}/employees`
pub async fn list_for_org(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
) -> Result<Json<Vec<EmployeeSummary>>, ApiError> {
    let employees = state
        .users
        .list_by_org(&OrgId::from(org_id.as_str()))
        .await?
        .into_iter()
        .map(EmployeeSummary::from)
        .collect();

    Ok(Json(employees))
}
