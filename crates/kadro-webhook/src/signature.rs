//! HMAC-SHA256 verification of provider signature headers.
//!
//! The provider signs `{id}.{timestamp}.{body}` with a pre-shared secret and
//! transmits the digest in a signature header that may carry several
//! candidates (space- or comma-delimited, each optionally `v1`-prefixed) so
//! that secret rotation on the provider side never drops deliveries. We
//! accept if any candidate matches under constant-time comparison and the
//! timestamp is within the replay tolerance window.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::WebhookError;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the provider's unique event identifier.
pub const HEADER_EVENT_ID: &str = "webhook-id";

/// Header carrying the delivery timestamp (unix seconds).
pub const HEADER_TIMESTAMP: &str = "webhook-timestamp";

/// Header carrying one or more payload signatures.
pub const HEADER_SIGNATURE: &str = "webhook-signature";

/// Default replay tolerance window in seconds.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// The three provider-supplied transport headers, extracted from a request.
#[derive(Debug, Clone)]
pub struct SignatureHeaders {
    /// Unique event identifier.
    pub event_id: String,
    /// Delivery timestamp as unix seconds.
    pub timestamp: String,
    /// Space- or comma-delimited signature candidates.
    pub signatures: String,
}

impl SignatureHeaders {
    /// Assemble the header set, rejecting if any part is absent.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::MissingHeaders` if any of the three values is
    /// `None`.
    pub fn from_parts(
        event_id: Option<&str>,
        timestamp: Option<&str>,
        signatures: Option<&str>,
    ) -> Result<Self, WebhookError> {
        match (event_id, timestamp, signatures) {
            (Some(id), Some(ts), Some(sig)) => Ok(Self {
                event_id: id.to_string(),
                timestamp: ts.to_string(),
                signatures: sig.to_string(),
            }),
            _ => Err(WebhookError::MissingHeaders),
        }
    }
}

/// Verifies inbound webhook deliveries against the pre-shared secret.
#[derive(Clone, Debug)]
pub struct WebhookVerifier {
    secret: Vec<u8>,
    tolerance_secs: i64,
}

impl WebhookVerifier {
    /// Create a verifier with the default replay tolerance.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::Misconfigured` if the secret is empty. Callers
    /// should treat this as fatal at startup.
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, WebhookError> {
        Self::with_tolerance(secret, DEFAULT_TOLERANCE_SECS)
    }

    /// Create a verifier with a custom replay tolerance in seconds.
    pub fn with_tolerance(
        secret: impl Into<Vec<u8>>,
        tolerance_secs: i64,
    ) -> Result<Self, WebhookError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(WebhookError::Misconfigured);
        }
        Ok(Self {
            secret,
            tolerance_secs,
        })
    }

    /// Verify a delivery against the exact payload bytes as transmitted.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::InvalidSignature` when no signature candidate
    /// matches or the timestamp falls outside the tolerance window. Pure
    /// validation; no side effects.
    pub fn verify(&self, headers: &SignatureHeaders, payload: &[u8]) -> Result<(), WebhookError> {
        // Replay mitigation: the timestamp must parse and sit within the
        // tolerance window on either side of now.
        let timestamp: i64 = headers
            .timestamp
            .trim()
            .parse()
            .map_err(|_| WebhookError::InvalidSignature)?;

        let now = Utc::now().timestamp();
        if (now - timestamp).abs() > self.tolerance_secs {
            return Err(WebhookError::InvalidSignature);
        }

        let expected = self.sign(&headers.event_id, &headers.timestamp, payload);

        // The header may carry several candidates; tokens like the bare
        // version marker "v1" simply fail the comparison.
        let matched = headers
            .signatures
            .split([' ', ','])
            .filter(|s| !s.is_empty())
            .map(|s| s.strip_prefix("v1=").unwrap_or(s))
            .any(|candidate| constant_time_eq(candidate.as_bytes(), expected.as_bytes()));

        if matched {
            Ok(())
        } else {
            Err(WebhookError::InvalidSignature)
        }
    }

    /// Compute the base64-encoded HMAC-SHA256 digest of
    /// `{event_id}.{timestamp}.{payload}`.
    #[must_use]
    pub fn sign(&self, event_id: &str, timestamp: &str, payload: &[u8]) -> String {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");

        mac.update(event_id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);

        BASE64.encode(mac.finalize().into_bytes())
    }
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    use subtle::ConstantTimeEq;
    a.ct_eq(b).into()
}
