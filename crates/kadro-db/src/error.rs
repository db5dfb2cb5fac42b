//! Error types for the kadro-db crate.
//!
//! Provides a unified error type that wraps `SQLx` errors with additional
//! context. Unique-constraint violations are surfaced as their own variant
//! carrying the constraint name, so callers can resolve idempotency
//! collisions (duplicate external subject, duplicate employee code,
//! duplicate default role) by re-fetch instead of failing.

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Failed to establish or acquire a database connection.
    ///
    /// This typically indicates network issues, invalid credentials,
    /// or the database server being unavailable.
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[source] sqlx::Error),

    /// A database migration failed to apply.
    #[error("Migration failed: {0}")]
    MigrationFailed(#[source] sqlx::migrate::MigrateError),

    /// A database query failed to execute.
    #[error("Query failed: {0}")]
    QueryFailed(#[source] sqlx::Error),

    /// An insert or update hit a unique constraint.
    ///
    /// Carries the violated constraint's name so callers can decide whether
    /// the collision is resolvable (re-fetch the existing row, regenerate a
    /// code) or a genuine conflict.
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation {
        /// Name of the violated constraint, as reported by Postgres.
        constraint: String,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Postgres error code for unique constraint violations.
const UNIQUE_VIOLATION_CODE: &str = "23505";

impl DbError {
    /// Map a query-time `sqlx::Error`, extracting unique violations.
    #[must_use]
    pub fn from_query(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            let is_unique = db_err
                .code()
                .is_some_and(|code| code == UNIQUE_VIOLATION_CODE);
            if is_unique {
                return DbError::UniqueViolation {
                    constraint: db_err.constraint().unwrap_or("unknown").to_string(),
                };
            }
        }
        DbError::QueryFailed(err)
    }

    /// Check if this error is a unique violation of the named constraint.
    #[must_use]
    pub fn violates(&self, name: &str) -> bool {
        matches!(self, DbError::UniqueViolation { constraint } if constraint == name)
    }

    /// Check if this error is any unique violation.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DbError::UniqueViolation { .. })
    }

    /// Check if this error indicates a connection problem.
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(self, DbError::ConnectionFailed(_))
    }

    /// Check if this error indicates a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound(_))
    }
}
