//! Organization entity model.
//!
//! The tenant root: every tenant-scoped record references exactly one
//! organization by its opaque identifier. Organizations are created through
//! the administrative path only and are deactivated rather than deleted.

use chrono::{DateTime, Utc};
use kadro_core::OrgId;
use serde::Serialize;
use sqlx::{FromRow, PgExecutor};

/// An organization (tenant) record in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Organization {
    /// Opaque, globally unique identifier (e.g. `org_2k3j4l5m`).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Contact email, unique across organizations.
    pub contact_email: String,

    /// Whether the organization is active. Deactivation cuts off every
    /// user's access on their next request.
    pub is_active: bool,

    /// When the organization was created.
    pub created_at: DateTime<Utc>,

    /// When the organization was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new organization.
#[derive(Debug, Clone)]
pub struct NewOrganization {
    pub id: OrgId,
    pub name: String,
    pub contact_email: String,
}

impl Organization {
    /// Get the identifier as a typed `OrgId`.
    #[must_use]
    pub fn org_id(&self) -> OrgId {
        OrgId::from(self.id.as_str())
    }

    /// Find an organization by its identifier.
    pub async fn find_by_id<'e, E>(executor: E, id: &OrgId) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as("SELECT * FROM organizations WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(executor)
            .await
    }

    /// Create an organization. Administrative path only.
    pub async fn create<'e, E>(executor: E, data: NewOrganization) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r#"
            INSERT INTO organizations (id, name, contact_email)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(data.id.as_str())
        .bind(&data.name)
        .bind(&data.contact_email)
        .fetch_one(executor)
        .await
    }

    /// Flip the active flag. Returns `false` if no such organization exists.
    pub async fn set_active<'e, E>(
        executor: E,
        id: &OrgId,
        active: bool,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            r#"
            UPDATE organizations
            SET is_active = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(active)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
