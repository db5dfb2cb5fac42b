//! Error types for webhook verification.

use thiserror::Error;

/// Errors produced when authenticating an inbound webhook delivery.
///
/// Signature mismatch and stale timestamp are deliberately the same variant:
/// a caller probing the endpoint learns nothing about which check failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WebhookError {
    /// One or more of the required signature headers is absent.
    #[error("missing signature headers")]
    MissingHeaders,

    /// The shared secret is not configured; deliveries cannot be verified.
    #[error("webhook authenticator misconfigured")]
    Misconfigured,

    /// The signature does not match or the timestamp is outside tolerance.
    #[error("invalid webhook signature")]
    InvalidSignature,
}
