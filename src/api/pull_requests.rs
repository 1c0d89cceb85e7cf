//! `/pullRequest/*` routes.

use super::error::{require, ApiErr};
use super::ApiState;
use crate::models::PullRequest;
use crate::services::assignment::{self, NewPullRequest, Reassignment};
use crate::services::pull_requests;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct CreatePullRequestRequest {
    pull_request_id: String,
    pull_request_name: String,
    author_id: String,
}

#[derive(Deserialize)]
struct PullRequestIdRequest {
    #[serde(default)]
    pull_request_id: String,
}

#[derive(Deserialize)]
struct ReassignRequest {
    pull_request_id: String,
    old_reviewer_id: String,
}

#[derive(Serialize)]
struct PullRequestResponse {
    pr: PullRequest,
}

pub fn pull_request_routes() -> Router<ApiState> {
    Router::new()
        .route("/pullRequest/create", post(create_pull_request))
        .route("/pullRequest/merge", post(merge_pull_request))
        .route("/pullRequest/reassign", post(reassign_reviewer))
        .route("/pullRequest/get", get(get_pull_request))
}

/// POST /pullRequest/create
async fn create_pull_request(
    State(state): State<ApiState>,
    payload: Result<Json<CreatePullRequestRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PullRequestResponse>), ApiErr> {
    let Json(req) = payload?;
    require(&req.pull_request_id, "pull_request_id")?;
    require(&req.pull_request_name, "pull_request_name")?;
    require(&req.author_id, "author_id")?;

    let pr = assignment::create_pull_request(
        &state.db,
        NewPullRequest::new(req.pull_request_id, req.pull_request_name, req.author_id),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(PullRequestResponse { pr })))
}

/// POST /pullRequest/merge
async fn merge_pull_request(
    State(state): State<ApiState>,
    payload: Result<Json<PullRequestIdRequest>, JsonRejection>,
) -> Result<Json<PullRequestResponse>, ApiErr> {
    let Json(req) = payload?;
    require(&req.pull_request_id, "pull_request_id")?;

    let pr = pull_requests::merge_pull_request(&state.db, &req.pull_request_id).await?;
    Ok(Json(PullRequestResponse { pr }))
}

/// POST /pullRequest/reassign
async fn reassign_reviewer(
    State(state): State<ApiState>,
    payload: Result<Json<ReassignRequest>, JsonRejection>,
) -> Result<Json<Reassignment>, ApiErr> {
    let Json(req) = payload?;
    require(&req.pull_request_id, "pull_request_id")?;
    require(&req.old_reviewer_id, "old_reviewer_id")?;

    let result =
        assignment::reassign_reviewer(&state.db, &req.pull_request_id, &req.old_reviewer_id)
            .await?;
    Ok(Json(result))
}

/// GET /pullRequest/get?pull_request_id=
async fn get_pull_request(
    State(state): State<ApiState>,
    query: Result<Query<PullRequestIdRequest>, QueryRejection>,
) -> Result<Json<PullRequestResponse>, ApiErr> {
    let Query(req) = query?;
    require(&req.pull_request_id, "pull_request_id")?;

    let pr = pull_requests::get_pull_request(&state.db, &req.pull_request_id).await?;
    Ok(Json(PullRequestResponse { pr }))
}
