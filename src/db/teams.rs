//! Queries for the `teams` table.

use sqlx::SqliteConnection;

/// Insert a team unless the name is taken.
///
/// Returns `true` when this call created the row. Within a write unit of
/// work the check and the insert are one statement, so two concurrent
/// creators cannot both see `true`.
pub async fn insert_if_absent(conn: &mut SqliteConnection, name: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("INSERT INTO teams (name) VALUES (?) ON CONFLICT(name) DO NOTHING")
        .bind(name)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() == 1)
}

/// Check whether a team with this name exists.
pub async fn exists(conn: &mut SqliteConnection, name: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM teams WHERE name = ?")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.is_some())
}
