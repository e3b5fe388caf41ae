//! Working groups behind the board's team filter.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use uuid::Uuid;

use gf_core::error::AppError;
use gf_core::models::{Team, TeamCreate, TeamUpdate};

use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<Vec<Team>>> {
    Ok(Json(state.teams.list_teams().await?))
}

pub async fn create(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(req): Json<TeamCreate>,
) -> ApiResult<(StatusCode, Json<Team>)> {
    req.validate()?;

    let team = Team {
        id: Uuid::now_v7(),
        name: req.name.trim().to_string(),
        description: req.description,
        member_ids: req.member_ids,
        created_at: Utc::now(),
    };
    state.teams.create_team(&team).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

pub async fn update(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<TeamUpdate>,
) -> ApiResult<Json<Team>> {
    let mut team = state
        .teams
        .team_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Team"))?;

    if let Some(name) = patch.name {
        if name.trim().is_empty() {
            return Err(AppError::validation("Name is required").into());
        }
        team.name = name.trim().to_string();
    }
    if patch.description.is_some() {
        team.description = patch.description;
    }
    if let Some(member_ids) = patch.member_ids {
        team.member_ids = member_ids;
    }

    if !state.teams.update_team(&team).await? {
        return Err(AppError::not_found("Team").into());
    }
    Ok(Json(team))
}

pub async fn remove(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if !state.teams.delete_team(id).await? {
        return Err(AppError::not_found("Team").into());
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use gf_core::models::UserRole;

    use super::*;
    use crate::router;
    use crate::test_support::{authorize, request, Mocks};

    #[tokio::test]
    async fn create_keeps_the_member_roster() {
        let mut mocks = Mocks::default();
        authorize(&mut mocks, UserRole::Member);
        mocks.teams.expect_create_team().returning(|_| Ok(()));

        let members = [Uuid::now_v7(), Uuid::now_v7()];
        let body = json!({"name": "Membership", "memberIds": members});
        let (status, body) = request(
            router(mocks.build()),
            "POST",
            "/api/teams",
            Some("token"),
            Some(body),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["memberIds"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn update_of_a_missing_team_is_404() {
        let mut mocks = Mocks::default();
        authorize(&mut mocks, UserRole::Member);
        mocks.teams.expect_team_by_id().returning(|_| Ok(None));

        let (status, body) = request(
            router(mocks.build()),
            "PUT",
            &format!("/api/teams/{}", Uuid::now_v7()),
            Some("token"),
            Some(json!({"name": "Renamed"})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Team not found");
    }
}
