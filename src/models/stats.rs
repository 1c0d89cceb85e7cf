//! Per-team review load figures.

use super::pull_request::PullRequestStatus;
use serde::Serialize;
use sqlx::FromRow;

/// How many open pull requests a team member is reviewing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct UserReviewLoad {
    pub user_id: String,
    pub open_reviews: i64,
}

/// Reviewer count of a pull request authored inside the team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestReviewerCount {
    pub pull_request_id: String,
    pub status: PullRequestStatus,
    pub reviewers_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamStats {
    pub team_name: String,
    pub users: Vec<UserReviewLoad>,
    pub pull_requests: Vec<PullRequestReviewerCount>,
}
