//! Pull request model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// State of a pull request. `Merged` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PullRequestStatus {
    Open,
    Merged,
}

impl PullRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
        }
    }
}

impl From<&str> for PullRequestStatus {
    fn from(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "MERGED" => Self::Merged,
            _ => Self::Open,
        }
    }
}

impl std::fmt::Display for PullRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pull request together with its current reviewers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    #[serde(rename = "pull_request_id")]
    pub id: String,

    #[serde(rename = "pull_request_name")]
    pub name: String,

    pub author_id: String,

    pub status: PullRequestStatus,

    /// Ids of the users currently assigned to review, in assignment order.
    #[serde(rename = "assigned_reviewers")]
    pub reviewers: Vec<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    /// `None` until the first merge, then fixed.
    #[serde(rename = "mergedAt")]
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    pub fn is_merged(&self) -> bool {
        self.status == PullRequestStatus::Merged
    }
}

/// Summary of a pull request, used when listing a reviewer's queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestShort {
    #[serde(rename = "pull_request_id")]
    pub id: String,

    #[serde(rename = "pull_request_name")]
    pub name: String,

    pub author_id: String,

    pub status: PullRequestStatus,
}

/// A `pull_requests` row as stored. Timestamps are Unix milliseconds.
#[derive(Debug, Clone, FromRow)]
pub struct PullRequestRow {
    pub id: String,
    pub name: String,
    pub author_id: String,
    pub status: String,
    pub created_at: i64,
    pub merged_at: Option<i64>,
}

impl PullRequestRow {
    pub fn status_enum(&self) -> PullRequestStatus {
        PullRequestStatus::from(self.status.as_str())
    }

    /// Attach the reviewer list read in the same unit of work.
    pub fn into_pull_request(self, reviewers: Vec<String>) -> PullRequest {
        let status = self.status_enum();
        PullRequest {
            id: self.id,
            name: self.name,
            author_id: self.author_id,
            status,
            reviewers,
            created_at: datetime_from_millis(self.created_at),
            merged_at: self.merged_at.map(datetime_from_millis),
        }
    }

    pub fn into_short(self) -> PullRequestShort {
        let status = self.status_enum();
        PullRequestShort {
            id: self.id,
            name: self.name,
            author_id: self.author_id,
            status,
        }
    }
}

/// Convert a stored Unix-millisecond timestamp.
pub fn datetime_from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(merged_at: Option<i64>) -> PullRequestRow {
        PullRequestRow {
            id: "pr-1".to_string(),
            name: "Add search".to_string(),
            author_id: "u1".to_string(),
            status: if merged_at.is_some() { "MERGED" } else { "OPEN" }.to_string(),
            created_at: 1_700_000_000_000,
            merged_at,
        }
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(PullRequestStatus::from("OPEN"), PullRequestStatus::Open);
        assert_eq!(PullRequestStatus::from("merged"), PullRequestStatus::Merged);
        assert_eq!(PullRequestStatus::from("unknown"), PullRequestStatus::Open);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(PullRequestStatus::Open.to_string(), "OPEN");
        assert_eq!(PullRequestStatus::Merged.to_string(), "MERGED");
    }

    #[test]
    fn test_open_row_has_no_merge_time() {
        let pr = row(None).into_pull_request(vec!["u2".to_string()]);
        assert_eq!(pr.status, PullRequestStatus::Open);
        assert!(pr.merged_at.is_none());
        assert_eq!(pr.created_at.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(pr.reviewers, vec!["u2".to_string()]);
    }

    #[test]
    fn test_pull_request_json_shape() {
        let pr = row(Some(1_700_000_360_000)).into_pull_request(vec![]);
        assert!(pr.is_merged());

        let json = serde_json::to_value(&pr).unwrap();
        assert_eq!(json["pull_request_id"], "pr-1");
        assert_eq!(json["pull_request_name"], "Add search");
        assert_eq!(json["status"], "MERGED");
        assert_eq!(json["assigned_reviewers"], serde_json::json!([]));
        assert!(json["createdAt"].is_string());
        assert!(json["mergedAt"].is_string());

        let open = serde_json::to_value(row(None).into_pull_request(vec![])).unwrap();
        assert!(open["mergedAt"].is_null());
    }
}
