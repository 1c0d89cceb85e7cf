//! Persistent store for teams, users, pull requests and reviewer assignments.
//!
//! This module handles:
//! - Connection pool management with WAL mode
//! - Schema migrations
//! - Per-table query functions that run inside a caller-supplied unit of work
//! - Classification of constraint violations reported by SQLite

pub mod pool;
pub mod pull_requests;
pub mod teams;
pub mod unit_of_work;
pub mod users;

use std::path::Path;
use thiserror::Error;

pub use pool::{DbPool, PoolSettings};

/// Database-related errors.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Integrity constraints the engine translates into domain conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    Unique,
    ForeignKey,
}

/// Classify a storage error as a constraint violation, if it is one.
pub fn constraint_violation(err: &sqlx::Error) -> Option<ConstraintViolation> {
    let db_err = err.as_database_error()?;
    match db_err.kind() {
        sqlx::error::ErrorKind::UniqueViolation => Some(ConstraintViolation::Unique),
        sqlx::error::ErrorKind::ForeignKeyViolation => Some(ConstraintViolation::ForeignKey),
        _ => None,
    }
}

/// Current time as Unix milliseconds, the unit every timestamp column uses.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Initialize the database: create the file if needed and run migrations.
///
/// # Arguments
/// * `db_path` - Path to the SQLite database file
/// * `settings` - Pool size and lock wait limits
///
/// # Returns
/// A connection pool configured with WAL mode
pub async fn initialize(db_path: &Path, settings: PoolSettings) -> Result<DbPool, DbError> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DbError::Migration(format!("Failed to create database directory: {}", e))
            })?;
        }
    }

    let pool = pool::create_pool(db_path, settings).await?;

    run_migrations(&pool).await?;

    log::info!("[db] Database ready at {}", db_path.display());

    Ok(pool)
}

/// Run all pending database migrations.
async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    let mut conn = pool.acquire().await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    let applied: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM _migrations WHERE name = '0001_initial_schema'")
            .fetch_optional(&mut *conn)
            .await?;

    if applied.is_none() {
        let migration_sql = include_str!("migrations/0001_initial_schema.sql");

        for statement in parse_sql_statements(migration_sql) {
            sqlx::query(&statement).execute(&mut *conn).await?;
        }

        sqlx::query("INSERT INTO _migrations (name) VALUES ('0001_initial_schema')")
            .execute(&mut *conn)
            .await?;

        log::info!("[db] Applied migration 0001_initial_schema");
    }

    Ok(())
}

/// Split a migration file into individual statements.
///
/// Comment lines are dropped and semicolons nested in parentheses
/// (e.g. `CHECK (status IN ('OPEN', 'MERGED'))`) do not end a statement.
fn parse_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current_statement = String::new();
    let mut paren_depth: i32 = 0;

    for line in sql.lines() {
        if line.trim().starts_with("--") {
            continue;
        }

        let line_without_comment = match line.find("--") {
            Some(idx) => &line[..idx],
            None => line,
        };

        for ch in line_without_comment.chars() {
            match ch {
                '(' => {
                    paren_depth += 1;
                    current_statement.push(ch);
                }
                ')' => {
                    paren_depth = paren_depth.saturating_sub(1);
                    current_statement.push(ch);
                }
                ';' if paren_depth == 0 => {
                    let stmt = current_statement.trim().to_string();
                    if !stmt.is_empty() {
                        statements.push(stmt);
                    }
                    current_statement.clear();
                }
                _ => current_statement.push(ch),
            }
        }

        if !current_statement.is_empty() {
            current_statement.push(' ');
        }
    }

    let final_stmt = current_statement.trim().to_string();
    if !final_stmt.is_empty() {
        statements.push(final_stmt);
    }

    statements
}
