//! SQLite connection pool with WAL mode.
//!
//! Every engine request borrows one connection from this pool for the
//! length of its unit of work. WAL lets read-only snapshots proceed while a
//! single writer holds the write lock.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Type alias for the SQLite connection pool.
pub type DbPool = Pool<Sqlite>;

/// Tunables for the connection pool.
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    /// Upper bound on concurrently open connections.
    pub max_connections: u32,
    /// How long a writer waits for the write lock before failing.
    pub busy_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            busy_timeout: Duration::from_secs(30),
        }
    }
}

/// Create a new connection pool with WAL mode and foreign keys enabled.
///
/// # Arguments
/// * `db_path` - Path to the SQLite database file
/// * `settings` - Pool size and lock wait limits
///
/// # Returns
/// A connection pool ready for use
pub async fn create_pool(db_path: &Path, settings: PoolSettings) -> Result<DbPool, sqlx::Error> {
    let db_url = format!("sqlite:{}", db_path.display());

    let connect_options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        // Reviewer and author references must resolve to real users
        .foreign_keys(true)
        // Writers queue on the write lock instead of failing immediately
        .busy_timeout(settings.busy_timeout)
        .pragma("wal_autocheckpoint", "1000");

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(connect_options)
        .await?;

    let mode: (String,) = sqlx::query_as("PRAGMA journal_mode")
        .fetch_one(&pool)
        .await?;

    debug_assert!(
        mode.0.to_lowercase() == "wal",
        "WAL mode should be enabled, got: {}",
        mode.0
    );

    Ok(pool)
}
