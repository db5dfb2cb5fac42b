//! Role entity model.
//!
//! A per-organization named permission bundle. The provisioning engine
//! guarantees a default "employee" role exists before the organization's
//! first user is created.

use chrono::{DateTime, Utc};
use kadro_core::OrgId;
use serde::Serialize;
use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

/// Unique constraint over `(org_id, name)`.
pub const ROLES_ORG_ID_NAME_KEY: &str = "roles_org_id_name_key";

/// A role record in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    /// Unique identifier for this role.
    pub id: Uuid,

    /// The organization this role belongs to.
    pub org_id: String,

    /// Role name, unique per organization (e.g. "employee").
    pub name: String,

    /// Numeric permission level.
    pub level: i32,

    /// Whether the role can be assigned.
    pub is_active: bool,

    /// When the role was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new role.
#[derive(Debug, Clone)]
pub struct NewRole {
    pub org_id: OrgId,
    pub name: String,
    pub level: i32,
}

impl Role {
    /// Get the organization identifier as a typed `OrgId`.
    #[must_use]
    pub fn org_id(&self) -> OrgId {
        OrgId::from(self.org_id.as_str())
    }

    /// Find a role by organization and name.
    pub async fn find_by_org_and_name<'e, E>(
        executor: E,
        org_id: &OrgId,
        name: &str,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as("SELECT * FROM roles WHERE org_id = $1 AND name = $2")
            .bind(org_id.as_str())
            .bind(name)
            .fetch_optional(executor)
            .await
    }

    /// Find a role by its identifier.
    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as("SELECT * FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Create a new role.
    ///
    /// A concurrent duplicate insert surfaces as a unique violation on
    /// [`ROLES_ORG_ID_NAME_KEY`]; callers treat that as "already created"
    /// and re-fetch.
    pub async fn create<'e, E>(executor: E, data: NewRole) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r#"
            INSERT INTO roles (org_id, name, level)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(data.org_id.as_str())
        .bind(&data.name)
        .bind(data.level)
        .fetch_one(executor)
        .await
    }
}
