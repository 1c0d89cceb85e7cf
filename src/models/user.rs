//! User model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A person who can author and review pull requests.
///
/// `team_name` is a back-reference to the team the user currently belongs
/// to; it is changed only by team operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    #[serde(rename = "user_id")]
    pub id: String,

    #[serde(rename = "username")]
    pub name: String,

    pub team_name: Option<String>,

    pub is_active: bool,
}

/// Filter for drawing users out of a team.
///
/// With a `limit` the result is a random sample; without one it is the
/// full matching roster ordered by id.
#[derive(Debug, Clone, Default)]
pub struct CandidateQuery {
    pub team_name: String,
    pub only_active: bool,
    pub exclude_ids: Vec<String>,
    pub limit: Option<u32>,
}

impl CandidateQuery {
    /// Every member of a team, active or not.
    pub fn roster(team_name: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            ..Self::default()
        }
    }

    /// Up to `limit` active members of a team, in random order.
    pub fn reviewers(team_name: impl Into<String>, limit: u32) -> Self {
        Self {
            team_name: team_name.into(),
            only_active: true,
            exclude_ids: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Skip these user ids.
    pub fn excluding<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_ids.extend(ids.into_iter().map(Into::into));
        self
    }
}
