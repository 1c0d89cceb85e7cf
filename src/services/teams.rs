//! Team directory.
//!
//! Owns team-name uniqueness. Rosters are never stored on the team; they
//! are always read back from the users table.

use crate::db::pool::DbPool;
use crate::db::{pull_requests, teams, unit_of_work, users};
use crate::error::AppError;
use crate::models::{CandidateQuery, Team, TeamMember, TeamStats, User};
use sqlx::SqliteConnection;

/// Create a team and place every member in it.
///
/// Fails with `TeamExists` without touching any user if the name is taken.
/// Members that already exist are moved into this team and their name and
/// active flag overwritten.
///
/// # Returns
/// The team with its stored roster, ordered by user id
pub async fn create_team(
    pool: &DbPool,
    team_name: &str,
    members: Vec<TeamMember>,
) -> Result<Team, AppError> {
    let mut tx = unit_of_work::begin_write(pool).await?;

    if !teams::insert_if_absent(&mut tx, team_name).await? {
        log::debug!("[teams] Rejected duplicate team {}", team_name);
        return Err(AppError::team_exists(team_name));
    }

    let users: Vec<User> = members
        .into_iter()
        .map(|member| member.into_user(team_name))
        .collect();
    users::upsert_users(&mut tx, &users).await?;

    let roster = load_roster(&mut tx, team_name).await?;
    tx.commit().await?;

    log::info!(
        "[teams] Created team {} with {} members",
        team_name,
        roster.len()
    );

    Ok(Team {
        team_name: team_name.to_string(),
        members: roster,
    })
}

/// Get a team with its current roster.
pub async fn get_team(pool: &DbPool, team_name: &str) -> Result<Team, AppError> {
    let mut tx = unit_of_work::begin_read(pool).await?;

    ensure_team(&mut tx, team_name).await?;
    let roster = load_roster(&mut tx, team_name).await?;
    tx.commit().await?;

    Ok(Team {
        team_name: team_name.to_string(),
        members: roster,
    })
}

/// Mark every member of a team inactive.
///
/// Existing reviewer assignments are left in place; inactive users are
/// only skipped by future selections.
pub async fn deactivate_team(pool: &DbPool, team_name: &str) -> Result<Vec<User>, AppError> {
    let mut tx = unit_of_work::begin_write(pool).await?;

    ensure_team(&mut tx, team_name).await?;
    let deactivated = users::deactivate_team(&mut tx, team_name).await?;
    tx.commit().await?;

    log::info!(
        "[teams] Deactivated {} members of team {}",
        deactivated.len(),
        team_name
    );

    Ok(deactivated)
}

/// Review load of a team's members and reviewer counts of its pull requests.
pub async fn get_team_stats(pool: &DbPool, team_name: &str) -> Result<TeamStats, AppError> {
    let mut tx = unit_of_work::begin_read(pool).await?;

    ensure_team(&mut tx, team_name).await?;
    let users = pull_requests::get_user_review_loads(&mut tx, team_name).await?;
    let pull_requests = pull_requests::get_reviewer_counts(&mut tx, team_name).await?;
    tx.commit().await?;

    Ok(TeamStats {
        team_name: team_name.to_string(),
        users,
        pull_requests,
    })
}

async fn ensure_team(conn: &mut SqliteConnection, team_name: &str) -> Result<(), AppError> {
    if teams::exists(conn, team_name).await? {
        Ok(())
    } else {
        Err(AppError::not_found_with_id("Team", team_name))
    }
}

async fn load_roster(
    conn: &mut SqliteConnection,
    team_name: &str,
) -> Result<Vec<TeamMember>, AppError> {
    let users = users::get_by_team(conn, &CandidateQuery::roster(team_name)).await?;
    Ok(users.into_iter().map(TeamMember::from).collect())
}
