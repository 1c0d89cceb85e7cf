//! Data models for the application.
//!
//! These models represent the entities stored in the SQLite database and
//! returned by the engine. Output models derive Serialize so callers can
//! hand them straight to a transport; row types derive FromRow.

pub mod pull_request;
pub mod stats;
pub mod team;
pub mod user;

pub use pull_request::{PullRequest, PullRequestRow, PullRequestShort, PullRequestStatus};
pub use stats::{PullRequestReviewerCount, TeamStats, UserReviewLoad};
pub use team::{Team, TeamMember};
pub use user::{CandidateQuery, User};
