//! `/team/*` routes.

use super::error::{require, ApiErr};
use super::ApiState;
use crate::models::{Team, TeamMember, TeamStats, User};
use crate::services::teams;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct AddTeamRequest {
    team_name: String,
    #[serde(default)]
    members: Vec<TeamMember>,
}

#[derive(Deserialize)]
struct TeamNameRequest {
    #[serde(default)]
    team_name: String,
}

#[derive(Serialize)]
struct TeamResponse {
    team: Team,
}

#[derive(Serialize)]
struct DeactivateTeamResponse {
    team_name: String,
    deactivated_users: Vec<User>,
}

pub fn team_routes() -> Router<ApiState> {
    Router::new()
        .route("/team/add", post(add_team))
        .route("/team/get", get(get_team))
        .route("/team/stats", get(get_team_stats))
        .route("/team/deactivate", post(deactivate_team))
}

/// POST /team/add
async fn add_team(
    State(state): State<ApiState>,
    payload: Result<Json<AddTeamRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiErr> {
    let Json(req) = payload?;
    require(&req.team_name, "team_name")?;
    for member in &req.members {
        require(&member.user_id, "user_id")?;
        require(&member.username, "username")?;
    }

    let team = teams::create_team(&state.db, &req.team_name, req.members).await?;
    Ok((StatusCode::CREATED, Json(TeamResponse { team })))
}

/// GET /team/get?team_name=
async fn get_team(
    State(state): State<ApiState>,
    query: Result<Query<TeamNameRequest>, QueryRejection>,
) -> Result<Json<Team>, ApiErr> {
    let Query(req) = query?;
    require(&req.team_name, "team_name")?;

    Ok(Json(teams::get_team(&state.db, &req.team_name).await?))
}

/// GET /team/stats?team_name=
async fn get_team_stats(
    State(state): State<ApiState>,
    query: Result<Query<TeamNameRequest>, QueryRejection>,
) -> Result<Json<TeamStats>, ApiErr> {
    let Query(req) = query?;
    require(&req.team_name, "team_name")?;

    Ok(Json(teams::get_team_stats(&state.db, &req.team_name).await?))
}

/// POST /team/deactivate
async fn deactivate_team(
    State(state): State<ApiState>,
    payload: Result<Json<TeamNameRequest>, JsonRejection>,
) -> Result<Json<DeactivateTeamResponse>, ApiErr> {
    let Json(req) = payload?;
    require(&req.team_name, "team_name")?;

    let deactivated_users = teams::deactivate_team(&state.db, &req.team_name).await?;
    Ok(Json(DeactivateTeamResponse {
        team_name: req.team_name,
        deactivated_users,
    }))
}
