//! Shared fixtures for service tests.

use crate::db::{initialize, DbPool, PoolSettings};
use crate::models::TeamMember;
use tempfile::TempDir;

/// Fresh database in a temporary directory. Keep the `TempDir` alive for
/// as long as the pool is used.
pub async fn setup_test_db() -> (TempDir, DbPool) {
    let dir = tempfile::tempdir().unwrap();
    let pool = initialize(&dir.path().join("test.db"), PoolSettings::default())
        .await
        .unwrap();
    (dir, pool)
}

pub fn member(id: &str, name: &str, is_active: bool) -> TeamMember {
    TeamMember {
        user_id: id.to_string(),
        username: name.to_string(),
        is_active,
    }
}
