//! Error types for credential and assertion handling.

use thiserror::Error;

/// Errors produced when issuing or verifying credentials.
///
/// Verification deliberately collapses every non-expiry failure into
/// `InvalidSignature`: a malformed token, a bad base64 segment, a claim set
/// that does not deserialize, and a genuine signature mismatch are all
/// indistinguishable to the caller. Only `Expired` is reported separately,
/// and the HTTP boundary presents both under one message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Signature verification failed or the token is malformed.
    #[error("invalid credential signature")]
    InvalidSignature,

    /// The credential's embedded expiry is in the past.
    #[error("credential expired")]
    Expired,

    /// A signing or verification key could not be used.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The claim set could not be encoded.
    #[error("encoding failed: {0}")]
    Encoding(String),

    /// The identity-provider assertion failed validation.
    #[error("invalid identity assertion: {0}")]
    InvalidAssertion(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            AuthError::InvalidSignature.to_string(),
            "invalid credential signature"
        );
        assert_eq!(AuthError::Expired.to_string(), "credential expired");
        assert_eq!(
            AuthError::InvalidAssertion("bad audience".to_string()).to_string(),
            "invalid identity assertion: bad audience"
        );
    }
}
