//! Database error types
//!
//! This module defines the error types that can occur during database operations
//! and their translation into the domain's `PortError`.

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Entity not found in database
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Check or not-null constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A stored value could not be mapped back to a domain type
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Pool exhaustion - no available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Generic SQL error
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Creates a not found error for a specific entity type and identifier
    ///
    /// # Example
    ///
    /// ```rust
    /// use infra_db::DatabaseError;
    ///
    /// let error = DatabaseError::not_found("Claim", "CLM-123");
    /// assert!(error.to_string().contains("Claim"));
    /// ```
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound(format!("{} with id '{}' not found", entity, id))
    }

    /// Checks if this error indicates a record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound(_))
    }

    /// Checks if this error is a constraint violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DatabaseError::DuplicateEntry(_) | DatabaseError::ConstraintViolation(_)
        )
    }

    /// Checks if this error is a connection-related issue
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }

    /// Maps a SQLx error to the most specific variant
    ///
    /// SQLite reports constraint failures through extended result codes:
    /// 1555 and 2067 are primary key and unique violations, 275 and 1299 are
    /// check and not-null violations.
    pub fn classify(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &error {
            let message = db_err.message().to_string();
            return match db_err.code().as_deref() {
                Some("1555") | Some("2067") => DatabaseError::DuplicateEntry(message),
                Some("275") | Some("1299") => DatabaseError::ConstraintViolation(message),
                _ => DatabaseError::QueryFailed(message),
            };
        }

        match error {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("Record not found".to_string()),
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            err @ (sqlx::Error::Io(_) | sqlx::Error::PoolClosed) => {
                DatabaseError::ConnectionFailed(err.to_string())
            }
            other => DatabaseError::SqlError(other),
        }
    }
}

impl From<DatabaseError> for PortError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(id) => PortError::not_found("Claim", id),
            DatabaseError::DuplicateEntry(message) => PortError::Conflict { message },
            err if err.is_connection_error() => PortError::Connection {
                message: err.to_string(),
                source: Some(Box::new(err)),
            },
            DatabaseError::SerializationError(message) => PortError::Transformation { message },
            other => PortError::Internal {
                message: other.to_string(),
                source: Some(Box::new(other)),
            },
        }
    }
}
