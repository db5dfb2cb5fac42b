//! kadro Provisioning Library
//!
//! The idempotent state-transition logic that turns external identity
//! events into local user records, enforcing the organization-membership
//! invariant and generating collision-free employee codes.
//!
//! Events arrive here only after the webhook authenticator has accepted
//! the delivery envelope; this crate never sees unverified payloads.

pub mod code;
pub mod engine;
pub mod error;
pub mod events;
pub mod external;

pub use code::{generate_employee_code, EMPLOYEE_CODE_PREFIX};
pub use engine::{
    EventOutcome, ProvisioningEngine, DEFAULT_ROLE_LEVEL, DEFAULT_ROLE_NAME, MAX_CODE_ATTEMPTS,
    PLACEHOLDER_FIRST_NAME,
};
pub use error::ProvisionError;
pub use events::{
    DeletedUser, WebhookEvent, EVENT_USER_CREATED, EVENT_USER_DELETED, EVENT_USER_UPDATED,
};
pub use external::{EmailAddress, ExternalUser, PhoneNumber, METADATA_ORGANIZATION_ID};
