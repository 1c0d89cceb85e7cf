//! Queries for the `users` table.

use crate::models::{CandidateQuery, User};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

/// Get a user by id.
pub async fn get_by_id(conn: &mut SqliteConnection, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, name, team_name, is_active FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
}

/// Draw users from a team according to `query`.
///
/// A limited query is sampled with `ORDER BY RANDOM()` inside the store,
/// so selection stays part of the caller's unit of work.
pub async fn get_by_team(
    conn: &mut SqliteConnection,
    query: &CandidateQuery,
) -> Result<Vec<User>, sqlx::Error> {
    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT id, name, team_name, is_active FROM users WHERE team_name = ");
    builder.push_bind(query.team_name.as_str());

    if query.only_active {
        builder.push(" AND is_active = 1");
    }

    if !query.exclude_ids.is_empty() {
        builder.push(" AND id NOT IN (");
        let mut ids = builder.separated(", ");
        for id in &query.exclude_ids {
            ids.push_bind(id.as_str());
        }
        ids.push_unseparated(")");
    }

    match query.limit {
        Some(limit) => {
            builder.push(" ORDER BY RANDOM() LIMIT ");
            builder.push_bind(i64::from(limit));
        }
        None => {
            builder.push(" ORDER BY id");
        }
    }

    builder
        .build_query_as::<User>()
        .fetch_all(&mut *conn)
        .await
}

/// Set a user's active flag. Returns `None` if the user doesn't exist.
pub async fn set_is_active(
    conn: &mut SqliteConnection,
    id: &str,
    is_active: bool,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET is_active = ?
        WHERE id = ?
        RETURNING id, name, team_name, is_active
        "#,
    )
    .bind(is_active)
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

/// Mark every member of a team inactive and return them, ordered by id.
pub async fn deactivate_team(
    conn: &mut SqliteConnection,
    team_name: &str,
) -> Result<Vec<User>, sqlx::Error> {
    let mut users = sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET is_active = 0
        WHERE team_name = ?
        RETURNING id, name, team_name, is_active
        "#,
    )
    .bind(team_name)
    .fetch_all(&mut *conn)
    .await?;

    // RETURNING order is unspecified
    users.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(users)
}

/// Insert or update users keyed by id.
pub async fn upsert_users(conn: &mut SqliteConnection, users: &[User]) -> Result<(), sqlx::Error> {
    if users.is_empty() {
        return Ok(());
    }

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("INSERT INTO users (id, name, team_name, is_active) ");
    builder.push_values(users, |mut row, user| {
        row.push_bind(user.id.as_str())
            .push_bind(user.name.as_str())
            .push_bind(user.team_name.as_deref())
            .push_bind(user.is_active);
    });
    builder.push(
        " ON CONFLICT(id) DO UPDATE SET name = excluded.name, team_name = excluded.team_name, is_active = excluded.is_active",
    );

    builder.build().execute(&mut *conn).await?;

    Ok(())
}
