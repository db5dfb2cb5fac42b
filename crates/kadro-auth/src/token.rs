//! Session credential encoding and verification with HS256.
//!
//! Credentials are signed with a symmetric secret shared by nothing outside
//! this service. Verification runs with zero clock leeway so the expiry
//! horizon is exact, and it performs no I/O: organization liveness checks
//! happen later, in the authorization gate.

use crate::claims::SessionClaims;
use crate::error::AuthError;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};

/// Fixed credential lifetime in days. Re-authentication is the only path to
/// a new credential; there is no refresh mechanism.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Issue a signed session credential for the given claim set.
///
/// Stamps `iat` with the current time and `exp` with the standard horizon
/// ([`SESSION_TTL_DAYS`]) before signing, replacing whatever the builder put
/// there.
///
/// # Errors
///
/// Returns `AuthError::Encoding` if the claim set cannot be serialized.
pub fn issue_credential(mut claims: SessionClaims, secret: &[u8]) -> Result<String, AuthError> {
    let now = Utc::now();
    claims.iat = now.timestamp();
    claims.exp = (now + Duration::days(SESSION_TTL_DAYS)).timestamp();

    encode_claims(&claims, secret)
}

/// Sign a claim set exactly as provided, without stamping the standard
/// expiry. [`issue_credential`] is the normal entry point.
pub fn encode_claims(claims: &SessionClaims, secret: &[u8]) -> Result<String, AuthError> {
    let key = EncodingKey::from_secret(secret);
    let header = Header::new(Algorithm::HS256);

    encode(&header, claims, &key).map_err(|e| AuthError::Encoding(e.to_string()))
}

/// Verify a session credential and return its claim set.
///
/// Validates the signature first, then the embedded expiry against the
/// current time with zero leeway. Never consults the database.
///
/// # Errors
///
/// - `AuthError::Expired` - the embedded expiry is in the past
/// - `AuthError::InvalidSignature` - anything else: signature mismatch,
///   malformed token, undecodable claims
pub fn verify_credential(token: &str, secret: &[u8]) -> Result<SessionClaims, AuthError> {
    let key = DecodingKey::from_secret(secret);

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.validate_aud = false;
    validation.algorithms = vec![Algorithm::HS256];

    let token_data: TokenData<SessionClaims> =
        decode(token, &key, &validation).map_err(map_jwt_error)?;

    Ok(token_data.claims)
}

/// Map jsonwebtoken errors to `AuthError`.
///
/// Everything except expiry collapses into `InvalidSignature` so callers
/// cannot distinguish a forged token from a corrupt one.
fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        _ => AuthError::InvalidSignature,
    }
}
