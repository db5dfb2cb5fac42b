//! kadro Database Library
//!
//! Data model and persistence layer for the kadro multi-tenant HR platform:
//! entity models with static query methods, the read-only tenant directory,
//! store traits for dependency injection, and embedded migrations.
//!
//! # Modules
//!
//! - [`models`] - Entity models (`Organization`, `Role`, `User`)
//! - [`directory`] - Tenant directory trait and Postgres implementation
//! - [`store`] - User/role store traits and Postgres implementations
//! - [`pool`] - Connection pool management
//! - [`migrations`] - Embedded migration runner
//! - [`error`] - `DbError`

pub mod directory;
pub mod error;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod store;

pub use directory::{PgTenantDirectory, TenantDirectory};
pub use error::DbError;
pub use migrations::run_migrations;
pub use models::{
    NewOrganization, NewRole, NewUser, Organization, ProfileUpdate, Role, User, UserStatus,
};
pub use pool::DbPool;
pub use store::{PgRoleStore, PgUserStore, RoleStore, UserStore};
