use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use reviewers::{PullRequestId, PullRequestService, TeamService, UserId, UserService};
use storage::InMemoryRepository;

use crate::{router, AppState};

fn app() -> Router {
    let repo = Arc::new(InMemoryRepository::new());
    let state = AppState {
        teams: TeamService::new(repo.clone(), repo.clone()),
        users: UserService::new(repo.clone()),
        pull_requests: PullRequestService::with_seed(repo.clone(), repo, 1),
    };
    router(Arc::new(state))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

fn new_id() -> String {
    UserId::new_random().to_string()
}

/// Adds team `name` with all-active members and returns their ids.
async fn add_team(app: &Router, name: &str, size: usize) -> Vec<String> {
    let ids: Vec<String> = (0..size).map(|_| new_id()).collect();
    let members: Vec<Value> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| json!({ "user_id": id, "username": format!("user{i}"), "is_active": true }))
        .collect();
    let (status, _) = post(app, "/team/add", json!({ "team_name": name, "members": members })).await;
    assert_eq!(status, StatusCode::CREATED);
    ids
}

async fn create_pr(app: &Router, author: &str) -> (String, Value) {
    let pr_id = PullRequestId::new_random().to_string();
    let (status, body) = post(
        app,
        "/pullRequest/create",
        json!({ "pull_request_id": pr_id, "pull_request_name": "Add search", "author_id": author }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    (pr_id, body)
}

fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = get(&app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_add_team_returns_created_team() {
    let app = app();
    let alice = new_id();
    let (status, body) = post(
        &app,
        "/team/add",
        json!({
            "team_name": "backend",
            "members": [{ "user_id": alice, "username": "alice", "is_active": false }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["team"]["team_name"], "backend");
    assert_eq!(body["team"]["members"][0]["user_id"], alice.as_str());
    assert_eq!(body["team"]["members"][0]["is_active"], false);

    let (status, body) = get(&app, "/team/get?team_name=backend").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["team_name"], "backend");
    assert_eq!(body["members"][0]["username"], "alice");
}

#[tokio::test]
async fn test_add_existing_team_is_team_exists() {
    let app = app();
    add_team(&app, "backend", 1).await;

    let (status, body) = post(&app, "/team/add", json!({ "team_name": "backend", "members": [] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "TEAM_EXISTS");
}

#[tokio::test]
async fn test_add_team_with_bad_uuid_is_invalid_input() {
    let (status, body) = post(
        &app(),
        "/team/add",
        json!({
            "team_name": "backend",
            "members": [{ "user_id": "nope", "username": "alice", "is_active": true }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INVALID_INPUT");
}

#[tokio::test]
async fn test_malformed_body_is_invalid_input() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/pullRequest/merge")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error_code(&body), "INVALID_INPUT");
}

#[tokio::test]
async fn test_get_team_requires_name_and_existing_team() {
    let app = app();

    let (status, body) = get(&app, "/team/get").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INVALID_INPUT");

    let (status, body) = get(&app, "/team/get?team_name=ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");
}

#[tokio::test]
async fn test_set_is_active() {
    let app = app();
    let ids = add_team(&app, "backend", 1).await;

    let (status, body) = post(
        &app,
        "/users/setIsActive",
        json!({ "user_id": ids[0], "is_active": false }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["is_active"], false);
    assert_eq!(body["user"]["team_name"], "backend");

    let (status, body) = post(
        &app,
        "/users/setIsActive",
        json!({ "user_id": new_id(), "is_active": false }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");

    let (status, _) = post(
        &app,
        "/users/setIsActive",
        json!({ "user_id": "bad", "is_active": false }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_pr_assigns_teammates() {
    let app = app();
    let ids = add_team(&app, "A", 3).await;

    let (pr_id, body) = create_pr(&app, &ids[0]).await;
    let pr = &body["pr"];

    assert_eq!(pr["pull_request_id"], pr_id.as_str());
    assert_eq!(pr["status"], "OPEN");
    assert!(pr["createdAt"].is_string());
    assert!(pr.get("mergedAt").is_none());

    let mut reviewers: Vec<&str> = pr["assigned_reviewers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    reviewers.sort();
    let mut expected = vec![ids[1].as_str(), ids[2].as_str()];
    expected.sort();
    assert_eq!(reviewers, expected);
}

#[tokio::test]
async fn test_create_pr_errors() {
    let app = app();
    let ids = add_team(&app, "A", 2).await;
    let (pr_id, _) = create_pr(&app, &ids[0]).await;

    let (status, body) = post(
        &app,
        "/pullRequest/create",
        json!({ "pull_request_id": pr_id, "pull_request_name": "Again", "author_id": ids[0] }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "PR_EXISTS");

    let (status, body) = post(
        &app,
        "/pullRequest/create",
        json!({
            "pull_request_id": PullRequestId::new_random().to_string(),
            "pull_request_name": "Orphan",
            "author_id": new_id()
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");

    let (status, body) = post(
        &app,
        "/pullRequest/create",
        json!({ "pull_request_id": "x", "pull_request_name": "Bad", "author_id": ids[0] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INVALID_INPUT");
}

#[tokio::test]
async fn test_merge_is_idempotent() {
    let app = app();
    let ids = add_team(&app, "A", 2).await;
    let (pr_id, _) = create_pr(&app, &ids[0]).await;

    let (status, first) = post(&app, "/pullRequest/merge", json!({ "pull_request_id": pr_id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["pr"]["status"], "MERGED");
    assert!(first["pr"]["mergedAt"].is_string());

    let (status, second) = post(&app, "/pullRequest/merge", json!({ "pull_request_id": pr_id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["pr"]["mergedAt"], first["pr"]["mergedAt"]);

    let (status, body) = post(
        &app,
        "/pullRequest/merge",
        json!({ "pull_request_id": PullRequestId::new_random().to_string() }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");
}

#[tokio::test]
async fn test_reassign_conflicts() {
    let app = app();
    let ids = add_team(&app, "A", 3).await;
    let (pr_id, _) = create_pr(&app, &ids[0]).await;

    let (status, body) = post(
        &app,
        "/pullRequest/reassign",
        json!({ "pull_request_id": pr_id, "old_user_id": ids[1] }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "NO_CANDIDATE");

    let (status, body) = post(
        &app,
        "/pullRequest/reassign",
        json!({ "pull_request_id": pr_id, "old_user_id": ids[0] }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "NOT_ASSIGNED");

    post(&app, "/pullRequest/merge", json!({ "pull_request_id": pr_id })).await;
    let (status, body) = post(
        &app,
        "/pullRequest/reassign",
        json!({ "pull_request_id": pr_id, "old_user_id": ids[1] }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "PR_MERGED");
}

#[tokio::test]
async fn test_reassign_replaces_reviewer() {
    let app = app();
    let ids = add_team(&app, "A", 4).await;
    let (pr_id, created) = create_pr(&app, &ids[0]).await;
    let before: Vec<String> = created["pr"]["assigned_reviewers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    let spare = ids[1..].iter().find(|id| !before.contains(id)).unwrap();

    let (status, body) = post(
        &app,
        "/pullRequest/reassign",
        json!({ "pull_request_id": pr_id, "old_user_id": before[0] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["replaced_by"], spare.as_str());
    assert_eq!(body["pr"]["assigned_reviewers"], json!([spare, before[1]]));
}

#[tokio::test]
async fn test_get_review_lists_assigned_prs() {
    let app = app();
    let ids = add_team(&app, "A", 2).await;
    let (pr_id, _) = create_pr(&app, &ids[0]).await;

    let (status, body) = get(&app, &format!("/users/getReview?user_id={}", ids[1])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], ids[1].as_str());
    assert_eq!(body["pull_requests"][0]["pull_request_id"], pr_id.as_str());
    assert_eq!(body["pull_requests"][0]["status"], "OPEN");

    let (status, body) = get(&app, &format!("/users/getReview?user_id={}", ids[0])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pull_requests"], json!([]));

    let (status, body) = get(&app, "/users/getReview").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INVALID_INPUT");
}
