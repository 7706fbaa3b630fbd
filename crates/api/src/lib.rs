//! PR reviewer HTTP adapter.
//!
//! Exposes the services of the [`reviewers`] crate as JSON endpoints:
//!
//! | Method | Path | Service call |
//! |--------|------|--------------|
//! | POST | `/team/add` | `TeamService::add_team` |
//! | GET | `/team/get` | `TeamService::get_team` |
//! | POST | `/users/setIsActive` | `UserService::set_is_active` |
//! | GET | `/users/getReview` | `PullRequestService::get_user_reviews` |
//! | POST | `/pullRequest/create` | `PullRequestService::create_pr` |
//! | POST | `/pullRequest/merge` | `PullRequestService::merge_pr` |
//! | POST | `/pullRequest/reassign` | `PullRequestService::reassign_reviewer` |
//! | GET | `/health` | liveness |
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Parsing, identifier validation and status-code mapping
//! live here; no business rule does.

pub mod dto;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use reviewers::{PullRequestService, TeamService, UserService};

pub use error::{ApiError, ErrorCode};

/// Services shared by every request.
pub struct AppState {
    pub teams: TeamService,
    pub users: UserService,
    pub pull_requests: PullRequestService,
}

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/team/add", post(handlers::team::add_team))
        .route("/team/get", get(handlers::team::get_team))
        .route("/users/setIsActive", post(handlers::user::set_is_active))
        .route("/users/getReview", get(handlers::user::get_review))
        .route("/pullRequest/create", post(handlers::pull_request::create))
        .route("/pullRequest/merge", post(handlers::pull_request::merge))
        .route("/pullRequest/reassign", post(handlers::pull_request::reassign))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "pr-reviewer"
    }))
}

#[cfg(test)]
mod tests;
