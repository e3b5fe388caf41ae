//! Club-wide notices. Everyone reads, the committee writes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use uuid::Uuid;

use gf_core::error::AppError;
use gf_core::models::{Announcement, AnnouncementCreate, AnnouncementUpdate};

use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<Vec<Announcement>>> {
    Ok(Json(state.announcements.list_announcements().await?))
}

pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<AnnouncementCreate>,
) -> ApiResult<(StatusCode, Json<Announcement>)> {
    user.require_exco()?;
    req.validate()?;

    let announcement = Announcement {
        id: Uuid::now_v7(),
        title: req.title.trim().to_string(),
        body: req.body.trim().to_string(),
        created_by: user.id(),
        created_at: Utc::now(),
    };
    state
        .announcements
        .create_announcement(&announcement)
        .await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<AnnouncementUpdate>,
) -> ApiResult<Json<Announcement>> {
    user.require_exco()?;

    let mut announcement = state
        .announcements
        .announcement_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Announcement"))?;

    if let Some(title) = patch.title {
        if title.trim().is_empty() {
            return Err(AppError::validation("Title is required").into());
        }
        announcement.title = title.trim().to_string();
    }
    if let Some(body) = patch.body {
        if body.trim().is_empty() {
            return Err(AppError::validation("Body is required").into());
        }
        announcement.body = body.trim().to_string();
    }

    if !state
        .announcements
        .update_announcement(&announcement)
        .await?
    {
        return Err(AppError::not_found("Announcement").into());
    }
    Ok(Json(announcement))
}

pub async fn remove(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    user.require_exco()?;
    if !state.announcements.delete_announcement(id).await? {
        return Err(AppError::not_found("Announcement").into());
    }
    Ok(StatusCode::NO_CONTENT)
}
