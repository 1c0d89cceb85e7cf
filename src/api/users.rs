//! `/users/*` routes.

use super::error::{require, ApiErr};
use super::ApiState;
use crate::models::{PullRequestShort, User};
use crate::services::users;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct SetIsActiveRequest {
    user_id: String,
    is_active: bool,
}

#[derive(Deserialize)]
struct UserIdQuery {
    #[serde(default)]
    user_id: String,
}

#[derive(Serialize)]
struct UserResponse {
    user: User,
}

#[derive(Serialize)]
struct ReviewsResponse {
    user_id: String,
    pull_requests: Vec<PullRequestShort>,
}

pub fn user_routes() -> Router<ApiState> {
    Router::new()
        .route("/users/setIsActive", post(set_is_active))
        .route("/users/getReview", get(get_reviews))
}

/// POST /users/setIsActive
async fn set_is_active(
    State(state): State<ApiState>,
    payload: Result<Json<SetIsActiveRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiErr> {
    let Json(req) = payload?;
    require(&req.user_id, "user_id")?;

    let user = users::set_is_active(&state.db, &req.user_id, req.is_active).await?;
    Ok(Json(UserResponse { user }))
}

/// GET /users/getReview?user_id=
async fn get_reviews(
    State(state): State<ApiState>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<Json<ReviewsResponse>, ApiErr> {
    let Query(req) = query?;
    require(&req.user_id, "user_id")?;

    let pull_requests = users::get_reviews(&state.db, &req.user_id).await?;
    Ok(Json(ReviewsResponse {
        user_id: req.user_id,
        pull_requests,
    }))
}
