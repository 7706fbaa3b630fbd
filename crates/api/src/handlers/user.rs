use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;

use reviewers::UserId;

use crate::dto::{
    PullRequestShortDto, SetIsActiveRequest, UserDto, UserEnvelope, UserQuery, UserReviewsDto,
};
use crate::error::{parse_id, ApiError, ApiResult};
use crate::AppState;

/// `POST /users/setIsActive`
pub async fn set_is_active(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SetIsActiveRequest>, JsonRejection>,
) -> ApiResult<Json<UserEnvelope>> {
    let Json(req) = payload?;
    let user_id: UserId = parse_id(&req.user_id, "user_id")?;

    let user = state.users.set_is_active(user_id, req.is_active).await?;
    Ok(Json(UserEnvelope {
        user: UserDto::from(&user),
    }))
}

/// `GET /users/getReview?user_id=`
///
/// A user with no assignments, known or not, gets an empty list.
pub async fn get_review(
    State(state): State<Arc<AppState>>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<Json<UserReviewsDto>> {
    let Query(query) = query?;
    let raw = query
        .user_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::invalid_input("user_id query parameter is required"))?;
    let user_id: UserId = parse_id(&raw, "user_id")?;

    let prs = state.pull_requests.get_user_reviews(user_id).await?;
    Ok(Json(UserReviewsDto {
        user_id: raw,
        pull_requests: prs.iter().map(PullRequestShortDto::from).collect(),
    }))
}
