//! Request and response bodies.
//!
//! Identifiers travel as strings and are parsed in the handlers so a bad UUID
//! is reported as `INVALID_INPUT` rather than a generic body rejection.

use serde::{Deserialize, Serialize};

use reviewers::{PullRequest, Team, User};

// ── Teams ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMemberDto {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

impl From<&User> for TeamMemberDto {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.to_string(),
            username: user.username.clone(),
            is_active: user.is_active,
        }
    }
}

/// Used both as the `/team/add` request body and as the team in responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamDto {
    pub team_name: String,
    pub members: Vec<TeamMemberDto>,
}

impl TeamDto {
    pub fn new(team: &Team, members: &[User]) -> Self {
        Self {
            team_name: team.name.to_string(),
            members: members.iter().map(TeamMemberDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TeamEnvelope {
    pub team: TeamDto,
}

#[derive(Debug, Deserialize)]
pub struct TeamQuery {
    pub team_name: Option<String>,
}

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.to_string(),
            username: user.username.clone(),
            team_name: user.team_name.to_string(),
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetIsActiveRequest {
    pub user_id: String,
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub user: UserDto,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserReviewsDto {
    pub user_id: String,
    pub pull_requests: Vec<PullRequestShortDto>,
}

// ── Pull requests ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PullRequestDto {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: String,
    pub assigned_reviewers: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "mergedAt", skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<String>,
}

impl From<&PullRequest> for PullRequestDto {
    fn from(pr: &PullRequest) -> Self {
        Self {
            pull_request_id: pr.id().to_string(),
            pull_request_name: pr.name().to_string(),
            author_id: pr.author_id().to_string(),
            status: pr.status().to_string(),
            assigned_reviewers: pr
                .assigned_reviewers()
                .iter()
                .map(ToString::to_string)
                .collect(),
            created_at: pr.created_at().to_string(),
            merged_at: pr.merged_at().map(|t| t.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PullRequestShortDto {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: String,
}

impl From<&PullRequest> for PullRequestShortDto {
    fn from(pr: &PullRequest) -> Self {
        Self {
            pull_request_id: pr.id().to_string(),
            pull_request_name: pr.name().to_string(),
            author_id: pr.author_id().to_string(),
            status: pr.status().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePullRequestRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
}

#[derive(Debug, Deserialize)]
pub struct MergePullRequestRequest {
    pub pull_request_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ReassignRequest {
    pub pull_request_id: String,
    pub old_user_id: String,
}

#[derive(Debug, Serialize)]
pub struct PullRequestEnvelope {
    pub pr: PullRequestDto,
}

#[derive(Debug, Serialize)]
pub struct ReassignResponse {
    pub pr: PullRequestDto,
    pub replaced_by: String,
}
