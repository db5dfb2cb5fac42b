//! Webhook event envelope.
//!
//! The provider delivers `{ "type": string, "data": object }`. Only the
//! three `user.*` lifecycle types are acted on; everything else is
//! acknowledged and ignored so new provider event types never break
//! delivery.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ProvisionError;

/// Event type for a newly created external user.
pub const EVENT_USER_CREATED: &str = "user.created";

/// Event type for a profile change on an external user.
pub const EVENT_USER_UPDATED: &str = "user.updated";

/// Event type for a deleted external user.
pub const EVENT_USER_DELETED: &str = "user.deleted";

/// A decoded webhook event envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// Event type discriminator (e.g. `user.created`).
    #[serde(rename = "type")]
    pub event_type: String,

    /// Type-specific payload.
    #[serde(default)]
    pub data: Value,
}

impl WebhookEvent {
    /// Parse an envelope from the raw delivery body.
    ///
    /// # Errors
    ///
    /// Returns `ProvisionError::MalformedEvent` when the body is not a JSON
    /// object of the expected shape.
    pub fn parse(payload: &[u8]) -> Result<Self, ProvisionError> {
        serde_json::from_slice(payload).map_err(|e| ProvisionError::MalformedEvent(e.to_string()))
    }
}

/// Payload of a `user.deleted` event: the provider sends only the subject.
#[derive(Debug, Clone, Deserialize)]
pub struct DeletedUser {
    /// The provider's subject identifier for the deleted user.
    pub id: String,
}
