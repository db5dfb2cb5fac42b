//! Database entity models.

pub mod organization;
pub mod role;
pub mod user;

pub use organization::{NewOrganization, Organization};
pub use role::{NewRole, Role, ROLES_ORG_ID_NAME_KEY};
pub use user::{
    NewUser, ProfileUpdate, User, UserStatus, USERS_EMAIL_KEY, USERS_EMPLOYEE_CODE_KEY,
    USERS_EXTERNAL_ID_KEY, USERS_ORG_ID_EMAIL_KEY, USERS_ORG_ID_EMPLOYEE_CODE_KEY,
};
