//! Database connection pool management
//!
//! This module provides connection pool configuration and creation for the
//! SQLite claims database using SQLx.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::DatabaseError;

/// Type alias for the SQLite connection pool
pub type DatabasePool = SqlitePool;

const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Configuration options for the database connection pool
///
/// # Example
///
/// ```rust
/// use infra_db::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("sqlite://claims.db")
///     .max_connections(8)
///     .connect_timeout(Duration::from_secs(10));
/// assert_eq!(config.max_connections, 8);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection string
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Connection timeout duration
    pub connect_timeout: Duration,
    /// How long a writer waits on a locked database before failing
    pub busy_timeout: Duration,
    /// Idle timeout before closing a connection, `None` keeps connections open
    pub idle_timeout: Option<Duration>,
}

impl DatabaseConfig {
    /// Creates a new database configuration with the given connection URL
    ///
    /// # Arguments
    ///
    /// * `url` - SQLite connection string (e.g., "sqlite://claims.db")
    ///
    /// # Returns
    ///
    /// A new `DatabaseConfig` with sensible defaults
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
            connect_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_secs(5),
            idle_timeout: Some(Duration::from_secs(10 * 60)), // 10 minutes
        }
    }

    /// Configuration for a private in-memory database
    ///
    /// Every SQLite in-memory connection is a separate database, so the pool
    /// is pinned to a single connection that is never recycled.
    pub fn in_memory() -> Self {
        Self {
            url: IN_MEMORY_URL.to_string(),
            max_connections: 1,
            connect_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_secs(5),
            idle_timeout: None,
        }
    }

    /// Sets the maximum number of connections in the pool
    ///
    /// # Arguments
    ///
    /// * `max` - Maximum connection count (default: 5)
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the connection timeout duration
    ///
    /// # Arguments
    ///
    /// * `timeout` - Duration to wait for a connection (default: 30s)
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new("sqlite://claims.db")
    }
}

/// Creates a database connection pool with the given configuration
///
/// The database file is created if it does not exist yet. File databases run
/// in WAL mode so readers are not blocked by the insert of a concurrent
/// submission.
///
/// # Errors
///
/// Returns `DatabaseError::ConnectionFailed` if the URL is invalid or the
/// pool cannot be created
///
/// # Example
///
/// ```rust,ignore
/// use infra_db::{DatabaseConfig, create_pool};
///
/// let pool = create_pool(DatabaseConfig::new("sqlite://claims.db")).await?;
/// ```
pub async fn create_pool(config: DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    info!(
        url = %config.url,
        max_connections = config.max_connections,
        "Creating database pool"
    );

    let mut options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?
        .create_if_missing(true)
        .busy_timeout(config.busy_timeout);

    if !config.is_in_memory() {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout)
        .idle_timeout(config.idle_timeout);

    if config.is_in_memory() {
        pool_options = pool_options.min_connections(1).max_lifetime(None);
    }

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Database pool created successfully");
    Ok(pool)
}
