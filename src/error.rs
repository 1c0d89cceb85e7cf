//! Application error types.
//!
//! Every engine operation returns one of these conditions. They are
//! serializable so the HTTP layer (or any other caller) can forward them
//! as structured values without knowing about the storage layer.

use serde::Serialize;
use thiserror::Error;

/// Domain-level errors returned by the reviewer assignment engine.
///
/// All variants serialize to a structured JSON object tagged by `type`.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum AppError {
    /// Requested team, user or pull request does not exist.
    #[error("Not found: {resource}")]
    NotFound {
        resource: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },

    /// A team with this name has already been created.
    #[error("team_name already exists: {team_name}")]
    TeamExists { team_name: String },

    /// A pull request with this id has already been created.
    #[error("PR id already exists: {pull_request_id}")]
    PullRequestExists { pull_request_id: String },

    /// Reviewers of a merged pull request are frozen.
    #[error("cannot reassign on merged PR: {pull_request_id}")]
    PullRequestMerged { pull_request_id: String },

    /// The departing reviewer holds no assignment on the pull request.
    #[error("reviewer {user_id} is not assigned to PR {pull_request_id}")]
    NotAssigned {
        pull_request_id: String,
        user_id: String,
    },

    /// The reviewer's team has nobody left who could take over.
    #[error("no active replacement candidate in team for PR {pull_request_id}")]
    NoCandidate { pull_request_id: String },

    /// Invalid input provided.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        field: Option<String>,
    },

    /// Database operation failed.
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        operation: Option<String>,
    },

    /// Internal application error.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    /// Create a database error with optional operation context.
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
            operation: None,
        }
    }

    /// Create a database error with operation context.
    pub fn database_with_op(message: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
            operation: Some(operation.into()),
        }
    }

    /// Create a not found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: None,
        }
    }

    /// Create a not found error with ID.
    pub fn not_found_with_id(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: Some(id.into()),
        }
    }

    pub fn team_exists(team_name: impl Into<String>) -> Self {
        Self::TeamExists {
            team_name: team_name.into(),
        }
    }

    pub fn pull_request_exists(pull_request_id: impl Into<String>) -> Self {
        Self::PullRequestExists {
            pull_request_id: pull_request_id.into(),
        }
    }

    pub fn pull_request_merged(pull_request_id: impl Into<String>) -> Self {
        Self::PullRequestMerged {
            pull_request_id: pull_request_id.into(),
        }
    }

    pub fn not_assigned(pull_request_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self::NotAssigned {
            pull_request_id: pull_request_id.into(),
            user_id: user_id.into(),
        }
    }

    pub fn no_candidate(pull_request_id: impl Into<String>) -> Self {
        Self::NoCandidate {
            pull_request_id: pull_request_id.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: None,
        }
    }

    /// Create an invalid input error with field name.
    pub fn invalid_input_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for this condition.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::TeamExists { .. } => "TEAM_EXISTS",
            Self::PullRequestExists { .. } => "PR_EXISTS",
            Self::PullRequestMerged { .. } => "PR_MERGED",
            Self::NotAssigned { .. } => "NOT_ASSIGNED",
            Self::NoCandidate { .. } => "NO_CANDIDATE",
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::Database { .. } | Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Whether this is one of the named domain conditions rather than an
    /// infrastructure failure.
    pub fn is_domain(&self) -> bool {
        !matches!(self, Self::Database { .. } | Self::Internal { .. })
    }
}

// Conversions from common error types

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::database(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(format!("JSON error: {}", err))
    }
}

impl From<crate::db::DbError> for AppError {
    fn from(err: crate::db::DbError) -> Self {
        Self::database(err.to_string())
    }
}
