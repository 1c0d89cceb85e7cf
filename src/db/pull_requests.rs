//! Queries for the `pull_requests` and `reviewers` tables.

use crate::models::{PullRequestReviewerCount, PullRequestRow, PullRequestShort, UserReviewLoad};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

const PULL_REQUEST_COLUMNS: &str = "id, name, author_id, status, created_at, merged_at";

// ── Pull requests ────────────────────────────────────────────────────────────

/// Insert a new open pull request.
///
/// A duplicate id surfaces as a unique violation and an unknown author as a
/// foreign key violation; see [`crate::db::constraint_violation`].
pub async fn insert(
    conn: &mut SqliteConnection,
    id: &str,
    name: &str,
    author_id: &str,
    created_at: i64,
) -> Result<PullRequestRow, sqlx::Error> {
    sqlx::query_as::<_, PullRequestRow>(&format!(
        r#"
        INSERT INTO pull_requests (id, name, author_id, status, created_at)
        VALUES (?, ?, ?, 'OPEN', ?)
        RETURNING {PULL_REQUEST_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(name)
    .bind(author_id)
    .bind(created_at)
    .fetch_one(&mut *conn)
    .await
}

/// Get a pull request row by id.
pub async fn get_by_id(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<PullRequestRow>, sqlx::Error> {
    sqlx::query_as::<_, PullRequestRow>(&format!(
        "SELECT {PULL_REQUEST_COLUMNS} FROM pull_requests WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

/// Mark a pull request merged.
///
/// `merged_at` keeps its first value, so repeating the call changes nothing.
/// Returns `None` if the pull request doesn't exist.
pub async fn merge(
    conn: &mut SqliteConnection,
    id: &str,
    merged_at: i64,
) -> Result<Option<PullRequestRow>, sqlx::Error> {
    sqlx::query_as::<_, PullRequestRow>(&format!(
        r#"
        UPDATE pull_requests
        SET status = 'MERGED', merged_at = COALESCE(merged_at, ?)
        WHERE id = ?
        RETURNING {PULL_REQUEST_COLUMNS}
        "#
    ))
    .bind(merged_at)
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

// ── Reviewer assignments ─────────────────────────────────────────────────────

/// Current reviewers of a pull request in the order they were assigned.
pub async fn get_reviewers(
    conn: &mut SqliteConnection,
    pr_id: &str,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT user_id FROM reviewers WHERE pr_id = ? ORDER BY rowid")
        .bind(pr_id)
        .fetch_all(&mut *conn)
        .await
}

/// Record each user as a reviewer of the pull request.
pub async fn add_reviewers(
    conn: &mut SqliteConnection,
    pr_id: &str,
    user_ids: &[String],
) -> Result<(), sqlx::Error> {
    if user_ids.is_empty() {
        return Ok(());
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("INSERT INTO reviewers (pr_id, user_id) ");
    builder.push_values(user_ids, |mut row, user_id| {
        row.push_bind(pr_id).push_bind(user_id.as_str());
    });
    builder.build().execute(&mut *conn).await?;

    Ok(())
}

/// Hand one reviewer's assignment over to another user.
///
/// The row keeps its position in the reviewer list. Returns `false` when
/// `previous_id` was not assigned to the pull request.
pub async fn replace_reviewer(
    conn: &mut SqliteConnection,
    pr_id: &str,
    previous_id: &str,
    new_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE reviewers SET user_id = ? WHERE pr_id = ? AND user_id = ?")
        .bind(new_id)
        .bind(pr_id)
        .bind(previous_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() == 1)
}

/// Pull requests the user is currently assigned to review.
pub async fn get_user_reviews(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Vec<PullRequestShort>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PullRequestRow>(
        r#"
        SELECT p.id, p.name, p.author_id, p.status, p.created_at, p.merged_at
        FROM reviewers r
        JOIN pull_requests p ON p.id = r.pr_id
        WHERE r.user_id = ?
        ORDER BY p.created_at, p.id
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.into_iter().map(PullRequestRow::into_short).collect())
}

// ── Stats ────────────────────────────────────────────────────────────────────

/// Open review count for every member of the team, including zeroes.
pub async fn get_user_review_loads(
    conn: &mut SqliteConnection,
    team_name: &str,
) -> Result<Vec<UserReviewLoad>, sqlx::Error> {
    sqlx::query_as::<_, UserReviewLoad>(
        r#"
        SELECT u.id AS user_id, COUNT(p.id) AS open_reviews
        FROM users u
        LEFT JOIN reviewers r ON r.user_id = u.id
        LEFT JOIN pull_requests p ON p.id = r.pr_id AND p.status = 'OPEN'
        WHERE u.team_name = ?
        GROUP BY u.id
        ORDER BY u.id
        "#,
    )
    .bind(team_name)
    .fetch_all(&mut *conn)
    .await
}

/// Reviewer count of every pull request authored by a team member.
pub async fn get_reviewer_counts(
    conn: &mut SqliteConnection,
    team_name: &str,
) -> Result<Vec<PullRequestReviewerCount>, sqlx::Error> {
    let rows: Vec<(String, String, i64)> = sqlx::query_as(
        r#"
        SELECT p.id, p.status, COUNT(r.user_id)
        FROM pull_requests p
        JOIN users u ON u.id = p.author_id
        LEFT JOIN reviewers r ON r.pr_id = p.id
        WHERE u.team_name = ?
        GROUP BY p.id, p.status
        ORDER BY p.status, p.id
        "#,
    )
    .bind(team_name)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(pull_request_id, status, reviewers_count)| PullRequestReviewerCount {
            pull_request_id,
            status: status.as_str().into(),
            reviewers_count,
        })
        .collect())
}
