//! kadro Auth Library
//!
//! Issues and verifies the self-contained session credential that carries
//! tenant context through every authenticated request, and validates the
//! identity assertions presented by the external identity provider during
//! credential exchange.
//!
//! Credential verification is pure in-memory computation: it never consults
//! the database. Organization liveness is re-checked separately by the
//! authorization gate.

pub mod assertion;
pub mod claims;
pub mod error;
pub mod token;

pub use assertion::{decode_assertion, AssertionClaims};
pub use claims::{SessionClaims, SessionClaimsBuilder};
pub use error::AuthError;
pub use token::{encode_claims, issue_credential, verify_credential, SESSION_TTL_DAYS};
