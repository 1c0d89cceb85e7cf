//! Reviewer assignment engine.
//!
//! Reviewers are drawn from a team's active members by the store's random
//! sampling. The author is never a candidate. On creation up to
//! [`INITIAL_REVIEWER_COUNT`] members of the author's team are assigned;
//! on reassignment exactly one member of the departing reviewer's team
//! takes over that reviewer's slot. Because the pool follows the departing
//! reviewer's team, a pull request may end up reviewed across teams.

use crate::db::pool::DbPool;
use crate::db::{constraint_violation, now_millis, pull_requests, unit_of_work, users};
use crate::db::ConstraintViolation;
use crate::error::AppError;
use crate::models::{CandidateQuery, PullRequest, PullRequestStatus, User};
use serde::Serialize;
use sqlx::SqliteConnection;

/// Reviewers assigned when a pull request is created (fewer if the team is small).
pub const INITIAL_REVIEWER_COUNT: u32 = 2;

/// Input for creating a pull request.
#[derive(Debug, Clone)]
pub struct NewPullRequest {
    pub id: String,
    pub name: String,
    pub author_id: String,
}

impl NewPullRequest {
    pub fn new(id: impl Into<String>, name: impl Into<String>, author_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            author_id: author_id.into(),
        }
    }
}

/// Outcome of a successful reassignment.
#[derive(Debug, Clone, Serialize)]
pub struct Reassignment {
    /// The user who took over the slot.
    pub replaced_by: String,
    /// The pull request with its refreshed reviewer list.
    #[serde(rename = "pr")]
    pub pull_request: PullRequest,
}

/// Create a pull request and assign its initial reviewers.
///
/// Zero reviewers is a valid outcome when the author's team has no other
/// active member.
pub async fn create_pull_request(
    pool: &DbPool,
    new_pr: NewPullRequest,
) -> Result<PullRequest, AppError> {
    let mut tx = unit_of_work::begin_write(pool).await?;

    let author = users::get_by_id(&mut tx, &new_pr.author_id)
        .await?
        .ok_or_else(|| AppError::not_found_with_id("Author", &new_pr.author_id))?;

    let row = pull_requests::insert(
        &mut tx,
        &new_pr.id,
        &new_pr.name,
        &author.id,
        now_millis(),
    )
    .await
    .map_err(|err| match constraint_violation(&err) {
        Some(ConstraintViolation::Unique) => AppError::pull_request_exists(&new_pr.id),
        Some(ConstraintViolation::ForeignKey) => {
            AppError::not_found_with_id("Author", &new_pr.author_id)
        }
        None => AppError::from(err),
    })?;

    let reviewers: Vec<String> = match author.team_name.as_deref() {
        Some(team_name) => {
            let query = CandidateQuery::reviewers(team_name, INITIAL_REVIEWER_COUNT)
                .excluding([author.id.as_str()]);
            draw_candidates(&mut tx, &query).await?
        }
        None => Vec::new(),
    };

    pull_requests::add_reviewers(&mut tx, &row.id, &reviewers).await?;
    tx.commit().await?;

    log::info!(
        "[assign] Created PR {} by {} with reviewers {:?}",
        row.id,
        author.id,
        reviewers
    );

    Ok(row.into_pull_request(reviewers))
}

/// Replace one reviewer of an open pull request.
///
/// The replacement is an active member of the departing reviewer's team who
/// is neither the author nor already reviewing this pull request. Nothing
/// changes unless every check passes.
pub async fn reassign_reviewer(
    pool: &DbPool,
    pull_request_id: &str,
    old_reviewer_id: &str,
) -> Result<Reassignment, AppError> {
    let mut tx = unit_of_work::begin_write(pool).await?;

    let departing = users::get_by_id(&mut tx, old_reviewer_id)
        .await?
        .ok_or_else(|| AppError::not_found_with_id("User", old_reviewer_id))?;

    let row = pull_requests::get_by_id(&mut tx, pull_request_id)
        .await?
        .ok_or_else(|| AppError::not_found_with_id("PullRequest", pull_request_id))?;

    if row.status_enum() == PullRequestStatus::Merged {
        log::debug!("[assign] Refused reassignment on merged PR {}", row.id);
        return Err(AppError::pull_request_merged(&row.id));
    }

    let current = pull_requests::get_reviewers(&mut tx, &row.id).await?;
    let replacement = pick_replacement(&mut tx, &departing, &row.author_id, &current)
        .await?
        .ok_or_else(|| AppError::no_candidate(&row.id))?;

    if !pull_requests::replace_reviewer(&mut tx, &row.id, &departing.id, &replacement).await? {
        return Err(AppError::not_assigned(&row.id, &departing.id));
    }

    let reviewers = pull_requests::get_reviewers(&mut tx, &row.id).await?;
    tx.commit().await?;

    log::info!(
        "[assign] PR {}: reviewer {} replaced by {}",
        row.id,
        departing.id,
        replacement
    );

    Ok(Reassignment {
        replaced_by: replacement,
        pull_request: row.into_pull_request(reviewers),
    })
}

async fn pick_replacement(
    conn: &mut SqliteConnection,
    departing: &User,
    author_id: &str,
    current_reviewers: &[String],
) -> Result<Option<String>, AppError> {
    let Some(team_name) = departing.team_name.as_deref() else {
        return Ok(None);
    };

    let query = CandidateQuery::reviewers(team_name, 1)
        .excluding([departing.id.as_str(), author_id])
        .excluding(current_reviewers.iter().map(String::as_str));

    Ok(draw_candidates(conn, &query).await?.into_iter().next())
}

async fn draw_candidates(
    conn: &mut SqliteConnection,
    query: &CandidateQuery,
) -> Result<Vec<String>, AppError> {
    let candidates = users::get_by_team(conn, query).await?;
    Ok(candidates.into_iter().map(|user| user.id).collect())
}
