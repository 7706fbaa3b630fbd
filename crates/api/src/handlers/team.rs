use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use reviewers::{TeamMember, TeamName};

use crate::dto::{TeamDto, TeamEnvelope, TeamQuery};
use crate::error::{parse_id, ApiError, ApiResult};
use crate::AppState;

/// `POST /team/add`
pub async fn add_team(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TeamDto>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TeamEnvelope>)> {
    let Json(req) = payload?;
    let name = team_name(req.team_name)?;

    let members = req
        .members
        .into_iter()
        .map(|m| -> ApiResult<TeamMember> {
            Ok(TeamMember {
                id: parse_id(&m.user_id, "user_id")?,
                username: m.username,
                is_active: m.is_active,
            })
        })
        .collect::<ApiResult<Vec<_>>>()?;

    let team = state.teams.add_team(name, members).await?;
    let (_, users) = state.teams.get_team(&team.name).await?;

    Ok((
        StatusCode::CREATED,
        Json(TeamEnvelope {
            team: TeamDto::new(&team, &users),
        }),
    ))
}

/// `GET /team/get?team_name=`
pub async fn get_team(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TeamQuery>, QueryRejection>,
) -> ApiResult<Json<TeamDto>> {
    let Query(query) = query?;
    let raw = query
        .team_name
        .ok_or_else(|| ApiError::invalid_input("team_name query parameter is required"))?;
    let name = team_name(raw)?;

    let (team, users) = state.teams.get_team(&name).await?;
    Ok(Json(TeamDto::new(&team, &users)))
}

fn team_name(raw: String) -> ApiResult<TeamName> {
    TeamName::new(raw).ok_or_else(|| ApiError::invalid_input("team_name must not be empty"))
}
