//! Persistence seams for users and roles.
//!
//! The provisioning engine and the HTTP handlers depend on these traits
//! rather than on `PgPool` directly, so tests run against in-memory fakes
//! and the idempotency races are straightforward to reproduce.

use async_trait::async_trait;
use kadro_core::{OrgId, SubjectId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{NewRole, NewUser, ProfileUpdate, Role, User};

/// Write and read path for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by external subject identifier.
    async fn find_by_external_id(&self, external_id: &SubjectId)
        -> Result<Option<User>, DbError>;

    /// Find a user by local identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DbError>;

    /// Insert a new user row.
    ///
    /// Duplicate inserts surface as `DbError::UniqueViolation` with the
    /// violated constraint's name; callers resolve them per constraint.
    async fn insert(&self, user: NewUser) -> Result<User, DbError>;

    /// Overwrite mutable profile fields. `None` if the user does not exist.
    async fn update_profile(
        &self,
        external_id: &SubjectId,
        update: ProfileUpdate,
    ) -> Result<Option<User>, DbError>;

    /// Soft-terminate the user and stamp the leave date. `None` if absent.
    async fn terminate(&self, external_id: &SubjectId) -> Result<Option<User>, DbError>;

    /// Check whether an employee code is already taken.
    async fn employee_code_exists(&self, code: &str) -> Result<bool, DbError>;

    /// List all users belonging to an organization.
    async fn list_by_org(&self, org_id: &OrgId) -> Result<Vec<User>, DbError>;
}

/// Write and read path for role records.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Find a role by organization and name.
    async fn find_by_name(&self, org_id: &OrgId, name: &str) -> Result<Option<Role>, DbError>;

    /// Find a role by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, DbError>;

    /// Insert a new role.
    ///
    /// A concurrent duplicate surfaces as a unique violation on
    /// `ROLES_ORG_ID_NAME_KEY`; callers treat it as "already created".
    async fn insert(&self, role: NewRole) -> Result<Role, DbError>;
}

/// Postgres-backed user store.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a store over the given pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_external_id(
        &self,
        external_id: &SubjectId,
    ) -> Result<Option<User>, DbError> {
        User::find_by_external_id(&self.pool, external_id)
            .await
            .map_err(DbError::from_query)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DbError> {
        User::find_by_id(&self.pool, id)
            .await
            .map_err(DbError::from_query)
    }

    async fn insert(&self, user: NewUser) -> Result<User, DbError> {
        User::insert(&self.pool, user)
            .await
            .map_err(DbError::from_query)
    }

    async fn update_profile(
        &self,
        external_id: &SubjectId,
        update: ProfileUpdate,
    ) -> Result<Option<User>, DbError> {
        User::update_profile(&self.pool, external_id, update)
            .await
            .map_err(DbError::from_query)
    }

    async fn terminate(&self, external_id: &SubjectId) -> Result<Option<User>, DbError> {
        User::terminate(&self.pool, external_id)
            .await
            .map_err(DbError::from_query)
    }

    async fn employee_code_exists(&self, code: &str) -> Result<bool, DbError> {
        User::employee_code_exists(&self.pool, code)
            .await
            .map_err(DbError::from_query)
    }

    async fn list_by_org(&self, org_id: &OrgId) -> Result<Vec<User>, DbError> {
        User::list_by_org(&self.pool, org_id)
            .await
            .map_err(DbError::from_query)
    }
}

/// Postgres-backed role store.
#[derive(Debug, Clone)]
pub struct PgRoleStore {
    pool: PgPool,
}

impl PgRoleStore {
    /// Create a store over the given pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleStore for PgRoleStore {
    async fn find_by_name(&self, org_id: &OrgId, name: &str) -> Result<Option<Role>, DbError> {
        Role::find_by_org_and_name(&self.pool, org_id, name)
            .await
            .map_err(DbError::from_query)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, DbError> {
        Role::find_by_id(&self.pool, id)
            .await
            .map_err(DbError::from_query)
    }

    async fn insert(&self, role: NewRole) -> Result<Role, DbError> {
        Role::create(&self.pool, role)
            .await
            .map_err(DbError::from_query)
    }
}
