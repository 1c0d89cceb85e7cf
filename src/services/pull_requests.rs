//! Pull request lifecycle: `OPEN` to `MERGED`, nothing else.

use crate::db::pool::DbPool;
use crate::db::{now_millis, pull_requests, unit_of_work};
use crate::error::AppError;
use crate::models::PullRequest;

/// Merge a pull request.
///
/// Merging an already merged pull request succeeds and returns the
/// original `merged_at`.
pub async fn merge_pull_request(pool: &DbPool, pull_request_id: &str) -> Result<PullRequest, AppError> {
    let mut tx = unit_of_work::begin_write(pool).await?;

    let row = pull_requests::merge(&mut tx, pull_request_id, now_millis())
        .await?
        .ok_or_else(|| AppError::not_found_with_id("PullRequest", pull_request_id))?;
    let reviewers = pull_requests::get_reviewers(&mut tx, &row.id).await?;
    tx.commit().await?;

    log::info!("[pull_requests] Merged PR {}", row.id);

    Ok(row.into_pull_request(reviewers))
}

/// Get a pull request with its current reviewers.
pub async fn get_pull_request(pool: &DbPool, pull_request_id: &str) -> Result<PullRequest, AppError> {
    let mut tx = unit_of_work::begin_read(pool).await?;

    let row = pull_requests::get_by_id(&mut tx, pull_request_id)
        .await?
        .ok_or_else(|| AppError::not_found_with_id("PullRequest", pull_request_id))?;
    let reviewers = pull_requests::get_reviewers(&mut tx, &row.id).await?;
    tx.commit().await?;

    Ok(row.into_pull_request(reviewers))
}
