use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use reviewers::{PullRequestId, UserId};

use crate::dto::{
    CreatePullRequestRequest, MergePullRequestRequest, PullRequestDto, PullRequestEnvelope,
    ReassignRequest, ReassignResponse,
};
use crate::error::{parse_id, ApiResult};
use crate::AppState;

/// `POST /pullRequest/create`
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreatePullRequestRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PullRequestEnvelope>)> {
    let Json(req) = payload?;
    let pr_id: PullRequestId = parse_id(&req.pull_request_id, "pull_request_id")?;
    let author_id: UserId = parse_id(&req.author_id, "author_id")?;

    let pr = state
        .pull_requests
        .create_pr(pr_id, req.pull_request_name, author_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PullRequestEnvelope {
            pr: PullRequestDto::from(&pr),
        }),
    ))
}

/// `POST /pullRequest/merge`
pub async fn merge(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MergePullRequestRequest>, JsonRejection>,
) -> ApiResult<Json<PullRequestEnvelope>> {
    let Json(req) = payload?;
    let pr_id: PullRequestId = parse_id(&req.pull_request_id, "pull_request_id")?;

    let pr = state.pull_requests.merge_pr(pr_id).await?;
    Ok(Json(PullRequestEnvelope {
        pr: PullRequestDto::from(&pr),
    }))
}

/// `POST /pullRequest/reassign`
pub async fn reassign(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ReassignRequest>, JsonRejection>,
) -> ApiResult<Json<ReassignResponse>> {
    let Json(req) = payload?;
    let pr_id: PullRequestId = parse_id(&req.pull_request_id, "pull_request_id")?;
    let old_reviewer: UserId = parse_id(&req.old_user_id, "old_user_id")?;

    let (pr, replaced_by) = state
        .pull_requests
        .reassign_reviewer(pr_id, old_reviewer)
        .await?;

    Ok(Json(ReassignResponse {
        pr: PullRequestDto::from(&pr),
        replaced_by: replaced_by.to_string(),
    }))
}
