//! kadro Webhook Library
//!
//! Decides whether an inbound provisioning event genuinely originates from
//! the external identity provider. Verification is pure computation over the
//! exact transmitted bytes: the signature covers the raw body, so any
//! re-serialization on our side invalidates it.

pub mod error;
pub mod signature;

pub use error::WebhookError;
pub use signature::{
    SignatureHeaders, WebhookVerifier, DEFAULT_TOLERANCE_SECS, HEADER_EVENT_ID, HEADER_SIGNATURE,
    HEADER_TIMESTAMP,
};
