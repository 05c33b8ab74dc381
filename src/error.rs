//! Domain error types for the PR review server.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use actix_web::{HttpResponse, ResponseError};
use std::fmt;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Referenced entity does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// A pull request with this id already exists
    #[error("pull request {0} already exists")]
    PrExists(String),

    /// A team with this name already exists
    #[error("team {0} already exists")]
    TeamExists(String),

    /// Operation is illegal on a merged pull request
    #[error("pull request {0} is already merged")]
    PrMerged(String),

    /// Target reviewer is not on the pull request
    #[error("user {0} is not assigned to pull request {1}")]
    NotAssigned(String, String),

    /// No eligible replacement reviewer exists
    #[error("no eligible replacement reviewer for pull request {0}")]
    NoCandidate(String),

    /// Concurrent update detected (optimistic version check failed)
    #[error("pull request {0} was modified concurrently, retry the operation")]
    Conflict(String),

    /// Invalid input data
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Database operation failed
    #[error("database error: {0}")]
    Database(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_code, response_message) = match self {
            AppError::NotFound(_) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                self.to_string(),
            ),
            AppError::PrExists(_) => (
                actix_web::http::StatusCode::CONFLICT,
                "PR_EXISTS",
                self.to_string(),
            ),
            AppError::TeamExists(_) => (
                actix_web::http::StatusCode::CONFLICT,
                "TEAM_EXISTS",
                self.to_string(),
            ),
            AppError::PrMerged(_) => (
                actix_web::http::StatusCode::CONFLICT,
                "PR_MERGED",
                self.to_string(),
            ),
            AppError::NotAssigned(_, _) => (
                actix_web::http::StatusCode::CONFLICT,
                "NOT_ASSIGNED",
                self.to_string(),
            ),
            AppError::NoCandidate(_) => (
                actix_web::http::StatusCode::CONFLICT,
                "NO_CANDIDATE",
                self.to_string(),
            ),
            AppError::Conflict(_) => (
                actix_web::http::StatusCode::CONFLICT,
                "CONFLICT",
                self.to_string(),
            ),
            AppError::InvalidInput(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "INVALID_INPUT",
                self.to_string(),
            ),
            AppError::Database(err_str) => {
                tracing::error!("Database error: {}", err_str);
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal database error occurred".to_string(),
                )
            }
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: error_code.to_string(),
            message: response_message,
        })
    }
}

/// Error response body matching OpenAPI schema.
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}
