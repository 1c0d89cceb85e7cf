//! Mapping of engine errors onto HTTP responses.

use crate::error::AppError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
struct ErrorDetails {
    code: &'static str,
    message: String,
}

/// Body of every error response: `{"error": {"code", "message"}}`.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetails,
}

/// Wrapper to make AppError usable as an axum error response.
#[derive(Debug)]
pub struct ApiErr(pub AppError);

impl ApiErr {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::TeamExists { .. } | AppError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AppError::PullRequestExists { .. }
            | AppError::PullRequestMerged { .. }
            | AppError::NotAssigned { .. }
            | AppError::NoCandidate { .. } => StatusCode::CONFLICT,
            AppError::Database { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiErr {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if !self.0.is_domain() {
            log::error!("[api] {}", self.0);
            "internal server error".to_string()
        } else {
            log::debug!("[api] {} {}", self.0.code(), self.0);
            self.0.to_string()
        };

        (
            status,
            Json(ErrorBody {
                error: ErrorDetails {
                    code: self.0.code(),
                    message,
                },
            }),
        )
            .into_response()
    }
}

impl From<AppError> for ApiErr {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiErr {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::invalid_input(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiErr {
    fn from(rejection: QueryRejection) -> Self {
        Self(AppError::invalid_input(rejection.body_text()))
    }
}

/// Reject a missing or blank required field.
pub fn require(value: &str, field: &'static str) -> Result<(), ApiErr> {
    if value.trim().is_empty() {
        return Err(ApiErr(AppError::invalid_input_field(
            format!("{} is required", field),
            field,
        )));
    }
    Ok(())
}
