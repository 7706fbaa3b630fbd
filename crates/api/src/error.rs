//! Mapping of domain errors to HTTP error responses.
//!
//! Every failure is rendered as
//! `{"error": {"code": "<CODE>", "message": "<text>"}}`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use reviewers::{EntityKind, ReviewError};

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    TeamExists,
    PrExists,
    PrMerged,
    NotAssigned,
    NoCandidate,
    NotFound,
    InvalidInput,
    InternalError,
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: ErrorCode,
    message: String,
}

/// Wrapper to make [`ReviewError`] usable as an axum error response.
#[derive(Debug)]
pub struct ApiError(pub ReviewError);

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self(ReviewError::invalid_input(message))
    }

    fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match &self.0 {
            ReviewError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, ErrorCode::InvalidInput),
            ReviewError::NotFound { .. } => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
            ReviewError::AlreadyExists {
                entity: EntityKind::Team,
                ..
            } => (StatusCode::BAD_REQUEST, ErrorCode::TeamExists),
            ReviewError::AlreadyExists {
                entity: EntityKind::PullRequest,
                ..
            } => (StatusCode::CONFLICT, ErrorCode::PrExists),
            ReviewError::PullRequestMerged { .. } => (StatusCode::CONFLICT, ErrorCode::PrMerged),
            ReviewError::NotAssigned { .. } => (StatusCode::CONFLICT, ErrorCode::NotAssigned),
            ReviewError::NoCandidate { .. } => (StatusCode::CONFLICT, ErrorCode::NoCandidate),
            // A user create losing a race with another upsert, or a backend fault.
            ReviewError::AlreadyExists {
                entity: EntityKind::User,
                ..
            }
            | ReviewError::Storage { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, "request failed with internal error");
            "internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (
            status,
            Json(ErrorBody {
                error: ErrorDetail { code, message },
            }),
        )
            .into_response()
    }
}

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid_input(format!("invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::invalid_input(format!("invalid query string: {}", rejection.body_text()))
    }
}

/// Parses a textual UUID identifier, naming the offending field on failure.
pub fn parse_id<T: std::str::FromStr>(raw: &str, field: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_input(format!("invalid {field} format")))
}

pub type ApiResult<T> = Result<T, ApiError>;
