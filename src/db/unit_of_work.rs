//! Transactions that bracket every engine operation.
//!
//! A unit of work is a plain `sqlx::Transaction`. Query functions take the
//! connection it derefs to, so one transaction threads through every step of
//! an operation. Dropping it without `commit()` rolls everything back, which
//! covers `?` early returns and cancelled request futures alike.

use super::pool::DbPool;
use sqlx::{Sqlite, Transaction};

/// An open, uncommitted transaction against the store.
pub type UnitOfWork = Transaction<'static, Sqlite>;

/// Begin a unit of work that will write.
///
/// `BEGIN IMMEDIATE` takes the database write lock before the first read,
/// so reads and the writes that depend on them see one serialized state.
/// A second writer waits for the pool's busy timeout and then fails.
pub async fn begin_write(pool: &DbPool) -> Result<UnitOfWork, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

/// Begin a read-only unit of work.
///
/// A deferred transaction holds a single WAL snapshot from its first read
/// until it ends, without blocking writers.
pub async fn begin_read(pool: &DbPool) -> Result<UnitOfWork, sqlx::Error> {
    pool.begin().await
}
