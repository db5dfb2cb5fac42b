//! Common test utilities: in-memory fakes for the engine's collaborators.
//!
//! The fakes enforce the same uniqueness rules as the real schema and
//! report violations under the same constraint names, so the engine's
//! collision handling is exercised exactly as it would be against Postgres.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use kadro_core::{OrgId, SubjectId, UserId};
use kadro_db::models::{
    NewRole, NewUser, Organization, ProfileUpdate, Role, User, UserStatus,
    ROLES_ORG_ID_NAME_KEY, USERS_EMPLOYEE_CODE_KEY, USERS_EXTERNAL_ID_KEY,
    USERS_ORG_ID_EMAIL_KEY,
};
use kadro_db::{DbError, RoleStore, TenantDirectory, UserStore};
use uuid::Uuid;

fn unique_violation(constraint: &str) -> DbError {
    DbError::UniqueViolation {
        constraint: constraint.to_string(),
    }
}

/// In-memory tenant directory.
#[derive(Default)]
pub struct InMemoryDirectory {
    orgs: Mutex<Vec<Organization>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_org(&self, id: &str, active: bool) {
        self.orgs.lock().unwrap().push(Organization {
            id: id.to_string(),
            name: format!("Org {id}"),
            contact_email: format!("ops@{id}.test"),
            is_active: active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
    }

    pub fn set_active(&self, id: &str, active: bool) {
        let mut orgs = self.orgs.lock().unwrap();
        if let Some(org) = orgs.iter_mut().find(|o| o.id == id) {
            org.is_active = active;
        }
    }
}

#[async_trait]
impl TenantDirectory for InMemoryDirectory {
    async fn find_org(&self, id: &OrgId) -> Result<Option<Organization>, DbError> {
        Ok(self
            .orgs
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id.as_str())
            .cloned())
    }
}

/// In-memory user store enforcing the schema's uniqueness constraints.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn all(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    fn materialize(data: NewUser) -> User {
        let now = Utc::now();
        User {
            id: *data.id.as_uuid(),
            external_id: data.external_id.as_str().to_string(),
            org_id: data.org_id.as_str().to_string(),
            role_id: data.role_id,
            employee_code: data.employee_code,
            email: data.email,
            first_name: data.first_name,
            last_name: data.last_name,
            phone: data.phone,
            status: UserStatus::Active,
            email_verified: data.email_verified,
            phone_verified: data.phone_verified,
            joined_at: data.joined_at,
            left_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_external_id(
        &self,
        external_id: &SubjectId,
    ) -> Result<Option<User>, DbError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.external_id == external_id.as_str())
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DbError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.id == id.as_uuid())
            .cloned())
    }

    async fn insert(&self, data: NewUser) -> Result<User, DbError> {
        let mut users = self.users.lock().unwrap();

        if users
            .iter()
            .any(|u| u.external_id == data.external_id.as_str())
        {
            return Err(unique_violation(USERS_EXTERNAL_ID_KEY));
        }
        if users.iter().any(|u| u.employee_code == data.employee_code) {
            return Err(unique_violation(USERS_EMPLOYEE_CODE_KEY));
        }
        if users
            .iter()
            .any(|u| u.org_id == data.org_id.as_str() && u.email == data.email)
        {
            return Err(unique_violation(USERS_ORG_ID_EMAIL_KEY));
        }

        let user = Self::materialize(data);
        users.push(user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        external_id: &SubjectId,
        update: ProfileUpdate,
    ) -> Result<Option<User>, DbError> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users
            .iter_mut()
            .find(|u| u.external_id == external_id.as_str())
        else {
            return Ok(None);
        };

        user.email = update.email;
        user.first_name = update.first_name;
        user.last_name = update.last_name;
        user.phone = update.phone;
        user.phone_verified = update.phone_verified;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn terminate(&self, external_id: &SubjectId) -> Result<Option<User>, DbError> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users
            .iter_mut()
            .find(|u| u.external_id == external_id.as_str())
        else {
            return Ok(None);
        };

        user.status = UserStatus::Terminated;
        user.left_at = Some(Utc::now());
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn employee_code_exists(&self, code: &str) -> Result<bool, DbError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.employee_code == code))
    }

    async fn list_by_org(&self, org_id: &OrgId) -> Result<Vec<User>, DbError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.org_id == org_id.as_str())
            .cloned()
            .collect())
    }
}

/// In-memory role store enforcing `(org_id, name)` uniqueness.
#[derive(Default)]
pub struct InMemoryRoleStore {
    roles: Mutex<Vec<Role>>,
}

impl InMemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.roles.lock().unwrap().len()
    }
}

#[async_trait]
impl RoleStore for InMemoryRoleStore {
    async fn find_by_name(&self, org_id: &OrgId, name: &str) -> Result<Option<Role>, DbError> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.org_id == org_id.as_str() && r.name == name)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, DbError> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn insert(&self, data: NewRole) -> Result<Role, DbError> {
        let mut roles = self.roles.lock().unwrap();

        if roles
            .iter()
            .any(|r| r.org_id == data.org_id.as_str() && r.name == data.name)
        {
            return Err(unique_violation(ROLES_ORG_ID_NAME_KEY));
        }

        let role = Role {
            id: Uuid::new_v4(),
            org_id: data.org_id.as_str().to_string(),
            name: data.name,
            level: data.level,
            is_active: true,
            created_at: Utc::now(),
        };
        roles.push(role.clone());
        Ok(role)
    }
}

/// User store that simulates a concurrent `user.created` delivery winning
/// the insert race: the first insert plants the rival's row, then reports
/// the unique violation the loser would see.
pub struct RaceyUserStore {
    pub inner: Arc<InMemoryUserStore>,
    raced: AtomicBool,
}

impl RaceyUserStore {
    pub fn new(inner: Arc<InMemoryUserStore>) -> Self {
        Self {
            inner,
            raced: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl UserStore for RaceyUserStore {
    async fn find_by_external_id(
        &self,
        external_id: &SubjectId,
    ) -> Result<Option<User>, DbError> {
        self.inner.find_by_external_id(external_id).await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DbError> {
        self.inner.find_by_id(id).await
    }

    async fn insert(&self, data: NewUser) -> Result<User, DbError> {
        if !self.raced.swap(true, Ordering::SeqCst) {
            let mut rival = data.clone();
            rival.id = UserId::new();
            self.inner.insert(rival).await?;
            return Err(DbError::UniqueViolation {
                constraint: USERS_EXTERNAL_ID_KEY.to_string(),
            });
        }
        self.inner.insert(data).await
    }

    async fn update_profile(
        &self,
        external_id: &SubjectId,
        update: ProfileUpdate,
    ) -> Result<Option<User>, DbError> {
        self.inner.update_profile(external_id, update).await
    }

    async fn terminate(&self, external_id: &SubjectId) -> Result<Option<User>, DbError> {
        self.inner.terminate(external_id).await
    }

    async fn employee_code_exists(&self, code: &str) -> Result<bool, DbError> {
        self.inner.employee_code_exists(code).await
    }

    async fn list_by_org(&self, org_id: &OrgId) -> Result<Vec<User>, DbError> {
        self.inner.list_by_org(org_id).await
    }
}

/// User store that rejects the first N inserts with an employee-code
/// violation, simulating generation collisions.
pub struct CollidingUserStore {
    pub inner: Arc<InMemoryUserStore>,
    collisions: AtomicU32,
}

impl CollidingUserStore {
    pub fn new(inner: Arc<InMemoryUserStore>, collisions: u32) -> Self {
        Self {
            inner,
            collisions: AtomicU32::new(collisions),
        }
    }
}

#[async_trait]
impl UserStore for CollidingUserStore {
    async fn find_by_external_id(
        &self,
        external_id: &SubjectId,
    ) -> Result<Option<User>, DbError> {
        self.inner.find_by_external_id(external_id).await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DbError> {
        self.inner.find_by_id(id).await
    }

    async fn insert(&self, data: NewUser) -> Result<User, DbError> {
        let remaining = self.collisions.load(Ordering::SeqCst);
        if remaining > 0 {
            self.collisions.store(remaining - 1, Ordering::SeqCst);
            return Err(DbError::UniqueViolation {
                constraint: USERS_EMPLOYEE_CODE_KEY.to_string(),
            });
        }
        self.inner.insert(data).await
    }

    async fn update_profile(
        &self,
        external_id: &SubjectId,
        update: ProfileUpdate,
    ) -> Result<Option<User>, DbError> {
        self.inner.update_profile(external_id, update).await
    }

    async fn terminate(&self, external_id: &SubjectId) -> Result<Option<User>, DbError> {
        self.inner.terminate(external_id).await
    }

    async fn employee_code_exists(&self, code: &str) -> Result<bool, DbError> {
        self.inner.employee_code_exists(code).await
    }

    async fn list_by_org(&self, org_id: &OrgId) -> Result<Vec<User>, DbError> {
        self.inner.list_by_org(org_id).await
    }
}

/// Role store that simulates a concurrent default-role creation winning the
/// race: the first insert plants the rival's row, then reports the unique
/// violation.
pub struct RaceyRoleStore {
    pub inner: Arc<InMemoryRoleStore>,
    raced: AtomicBool,
}

impl RaceyRoleStore {
    pub fn new(inner: Arc<InMemoryRoleStore>) -> Self {
        Self {
            inner,
            raced: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl RoleStore for RaceyRoleStore {
    async fn find_by_name(&self, org_id: &OrgId, name: &str) -> Result<Option<Role>, DbError> {
        self.inner.find_by_name(org_id, name).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, DbError> {
        self.inner.find_by_id(id).await
    }

    async fn insert(&self, data: NewRole) -> Result<Role, DbError> {
        if !self.raced.swap(true, Ordering::SeqCst) {
            self.inner.insert(data).await?;
            return Err(DbError::UniqueViolation {
                constraint: ROLES_ORG_ID_NAME_KEY.to_string(),
            });
        }
        self.inner.insert(data).await
    }
}
