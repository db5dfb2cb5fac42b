//! Tenant directory: read-only organization lookups.
//!
//! Answers "does organization X exist and is it active?" for the
//! provisioning engine and the authorization gate. Implementations must not
//! cache: an organization can be deactivated at any moment, and every
//! authorization decision re-reads current state so deactivation takes
//! effect on the very next request.

use async_trait::async_trait;
use kadro_core::OrgId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::Organization;

/// Read path for organization existence and active-status queries.
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    /// Look up an organization by identifier.
    async fn find_org(&self, id: &OrgId) -> Result<Option<Organization>, DbError>;

    /// Check whether an organization exists and is active.
    async fn org_is_active(&self, id: &OrgId) -> Result<bool, DbError> {
        Ok(self.find_org(id).await?.is_some_and(|org| org.is_active))
    }
}

/// Postgres-backed tenant directory.
#[derive(Debug, Clone)]
pub struct PgTenantDirectory {
    pool: PgPool,
}

impl PgTenantDirectory {
    /// Create a directory over the given pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantDirectory for PgTenantDirectory {
    async fn find_org(&self, id: &OrgId) -> Result<Option<Organization>, DbError> {
        Organization::find_by_id(&self.pool, id)
            .await
            .map_err(DbError::from_query)
    }
}
