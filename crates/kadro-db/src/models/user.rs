//! User entity model.
//!
//! A local identity bound 1:1 to an external identity-provider subject.
//! Rows are created only by the provisioning engine; organization and role
//! references are immutable after creation, and provider-side deletion maps
//! to a soft status transition, never a row delete.

use chrono::{DateTime, Utc};
use kadro_core::{OrgId, SubjectId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

/// Unique constraint over `external_id`.
pub const USERS_EXTERNAL_ID_KEY: &str = "users_external_id_key";

/// Global unique constraint over `employee_code`.
pub const USERS_EMPLOYEE_CODE_KEY: &str = "users_employee_code_key";

/// Unique constraint over `(org_id, employee_code)`.
pub const USERS_ORG_ID_EMPLOYEE_CODE_KEY: &str = "users_org_id_employee_code_key";

/// Global unique constraint over `email`.
pub const USERS_EMAIL_KEY: &str = "users_email_key";

/// Unique constraint over `(org_id, email)`.
pub const USERS_ORG_ID_EMAIL_KEY: &str = "users_org_id_email_key";

/// Lifecycle status of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
    Terminated,
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::Suspended => write!(f, "suspended"),
            Self::Terminated => write!(f, "terminated"),
        }
    }
}

/// A user record in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    /// Unique local identifier, minted by the provisioning engine.
    pub id: Uuid,

    /// The identity provider's stable subject identifier, unique globally.
    pub external_id: String,

    /// The organization this user belongs to. Immutable after creation.
    pub org_id: String,

    /// The user's role. Immutable after creation by this subsystem.
    pub role_id: Uuid,

    /// Human-facing employee code, unique per organization and globally.
    pub employee_code: String,

    /// Email address, unique per organization and globally.
    pub email: String,

    /// First name. Defaults to a placeholder when the provider omits one.
    pub first_name: String,

    /// Last name. May be empty.
    pub last_name: String,

    /// Phone number, when the provider supplied one.
    pub phone: Option<String>,

    /// Lifecycle status.
    pub status: UserStatus,

    /// Whether the email is verified (provider-asserted at creation).
    pub email_verified: bool,

    /// Whether the phone is verified.
    pub phone_verified: bool,

    /// When the user joined.
    pub joined_at: DateTime<Utc>,

    /// When the user left (stamped on termination, None otherwise).
    pub left_at: Option<DateTime<Utc>>,

    /// When the row was created.
    pub created_at: DateTime<Utc>,

    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: UserId,
    pub external_id: SubjectId,
    pub org_id: OrgId,
    pub role_id: Uuid,
    pub employee_code: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email_verified: bool,
    pub phone_verified: bool,
    pub joined_at: DateTime<Utc>,
}

/// Mutable profile fields, overwritten by provider update events.
///
/// Organization and role are deliberately absent: they are immutable
/// post-creation by this subsystem.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub phone_verified: bool,
}

impl User {
    /// Get the local identifier as a typed `UserId`.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.id)
    }

    /// Get the external subject identifier as a typed `SubjectId`.
    #[must_use]
    pub fn subject_id(&self) -> SubjectId {
        SubjectId::from(self.external_id.as_str())
    }

    /// Get the organization identifier as a typed `OrgId`.
    #[must_use]
    pub fn org_id(&self) -> OrgId {
        OrgId::from(self.org_id.as_str())
    }

    /// Check if the user is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Find a user by external subject identifier.
    pub async fn find_by_external_id<'e, E>(
        executor: E,
        external_id: &SubjectId,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as("SELECT * FROM users WHERE external_id = $1")
            .bind(external_id.as_str())
            .fetch_optional(executor)
            .await
    }

    /// Find a user by local identifier.
    pub async fn find_by_id<'e, E>(executor: E, id: &UserId) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(executor)
            .await
    }

    /// Insert a new user row with status `active`.
    ///
    /// Concurrent duplicate deliveries surface as a unique violation on
    /// [`USERS_EXTERNAL_ID_KEY`]; employee-code collisions surface on
    /// [`USERS_EMPLOYEE_CODE_KEY`] or [`USERS_ORG_ID_EMPLOYEE_CODE_KEY`].
    pub async fn insert<'e, E>(executor: E, data: NewUser) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r#"
            INSERT INTO users (
                id, external_id, org_id, role_id, employee_code, email,
                first_name, last_name, phone, status, email_verified,
                phone_verified, joined_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'active', $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(data.id.as_uuid())
        .bind(data.external_id.as_str())
        .bind(data.org_id.as_str())
        .bind(data.role_id)
        .bind(&data.employee_code)
        .bind(&data.email)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.phone)
        .bind(data.email_verified)
        .bind(data.phone_verified)
        .bind(data.joined_at)
        .fetch_one(executor)
        .await
    }

    /// Overwrite mutable profile fields for the given subject.
    ///
    /// Returns `None` if no such user exists.
    pub async fn update_profile<'e, E>(
        executor: E,
        external_id: &SubjectId,
        update: ProfileUpdate,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r#"
            UPDATE users
            SET email = $2, first_name = $3, last_name = $4, phone = $5,
                phone_verified = $6, updated_at = NOW()
            WHERE external_id = $1
            RETURNING *
            "#,
        )
        .bind(external_id.as_str())
        .bind(&update.email)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.phone)
        .bind(update.phone_verified)
        .fetch_optional(executor)
        .await
    }

    /// Transition the user to `terminated` and stamp the leave date.
    ///
    /// Returns `None` if no such user exists. Soft only; the row remains
    /// so historical HR records stay referentially intact.
    pub async fn terminate<'e, E>(
        executor: E,
        external_id: &SubjectId,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r#"
            UPDATE users
            SET status = 'terminated', left_at = NOW(), updated_at = NOW()
            WHERE external_id = $1
            RETURNING *
            "#,
        )
        .bind(external_id.as_str())
        .fetch_optional(executor)
        .await
    }

    /// Check whether an employee code is already taken.
    pub async fn employee_code_exists<'e, E>(executor: E, code: &str) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE employee_code = $1)")
                .bind(code)
                .fetch_one(executor)
                .await?;
        Ok(result.0)
    }

    /// List all users belonging to an organization.
    pub async fn list_by_org<'e, E>(executor: E, org_id: &OrgId) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as("SELECT * FROM users WHERE org_id = $1 ORDER BY joined_at")
            .bind(org_id.as_str())
            .fetch_all(executor)
            .await
    }
}
