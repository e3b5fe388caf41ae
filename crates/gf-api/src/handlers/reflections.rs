//! Post-meeting reflections.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use gf_core::error::AppError;
use gf_core::models::{Reflection, ReflectionCreate};

use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionQuery {
    pub meeting_id: Option<Uuid>,
}

pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(query): Query<ReflectionQuery>,
) -> ApiResult<Json<Vec<Reflection>>> {
    Ok(Json(state.reflections.reflections(query.meeting_id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<ReflectionCreate>,
) -> ApiResult<(StatusCode, Json<Reflection>)> {
    let meeting_id = req.validate()?;
    if state.meetings.meeting_by_id(meeting_id).await?.is_none() {
        return Err(AppError::not_found("Meeting").into());
    }

    let reflection = Reflection {
        id: Uuid::now_v7(),
        meeting_id,
        user_id: user.id(),
        user_name: user.name().to_string(),
        content: req.content.trim().to_string(),
        created_at: Utc::now(),
    };
    state.reflections.add_reflection(&reflection).await?;
    Ok((StatusCode::CREATED, Json(reflection)))
}
