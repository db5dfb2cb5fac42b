//! Application configuration loaded from environment variables.
//!
//! Fail-fast: required variables must be present and valid, or the
//! application exits with a clear error before serving a single request.
//! A missing secret must never degrade silently into an unverifiable
//! webhook endpoint or an unsignable credential.

use std::env;
use thiserror::Error;

/// Default replay tolerance for webhook timestamps, in seconds.
const DEFAULT_WEBHOOK_TOLERANCE_SECS: i64 = 300;

/// Configuration errors that can occur during environment loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind host (default `0.0.0.0`).
    pub host: String,

    /// Bind port (default `8080`).
    pub port: u16,

    /// Postgres connection string.
    pub database_url: String,

    /// Symmetric secret for session credential signing.
    pub session_signing_secret: String,

    /// Shared secret for webhook signature verification.
    pub webhook_signing_secret: String,

    /// PEM-encoded public key of the identity provider, used to validate
    /// assertions at the credential exchange endpoint.
    pub provider_jwt_public_key: String,

    /// Replay tolerance for webhook timestamps, in seconds.
    pub webhook_tolerance_secs: i64,

    /// Log filter directive (default `info`).
    pub log_filter: String,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a required variable is absent or an
    /// optional one does not parse. Callers treat this as fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_optional("PORT", 8080)?;
        let webhook_tolerance_secs =
            parse_optional("WEBHOOK_TOLERANCE_SECS", DEFAULT_WEBHOOK_TOLERANCE_SECS)?;
        let log_filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            host,
            port,
            database_url: require("DATABASE_URL")?,
            session_signing_secret: require("SESSION_SIGNING_SECRET")?,
            webhook_signing_secret: require("WEBHOOK_SIGNING_SECRET")?,
            provider_jwt_public_key: require("PROVIDER_JWT_PUBLIC_KEY")?,
            webhook_tolerance_secs,
            log_filter,
        })
    }
}

fn require(var: &str) -> Result<String, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(var.to_string())),
    }
}

fn parse_optional<T: std::str::FromStr>(var: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(value) if !value.is_empty() => value.parse().map_err(|e| ConfigError::InvalidValue {
            var: var.to_string(),
            message: format!("{e}"),
        }),
        _ => Ok(default),
    }
}
