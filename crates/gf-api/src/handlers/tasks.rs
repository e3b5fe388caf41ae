//! Kanban tasks. Any authenticated member may manage the board.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use uuid::Uuid;

use gf_core::error::AppError;
use gf_core::models::{Task, TaskCreate, TaskStatus, TaskUpdate, TeamRef};

use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(state.tasks.list_tasks().await?))
}

/// Looks up the team so responses can embed `{id, name}` instead of a bare
/// id the board would have to resolve itself.
async fn team_ref(state: &AppState, team_id: Option<Uuid>) -> ApiResult<Option<TeamRef>> {
    let Some(team_id) = team_id else {
        return Ok(None);
    };
    let team = state
        .teams
        .team_by_id(team_id)
        .await?
        .ok_or_else(|| AppError::not_found("Team"))?;
    Ok(Some(TeamRef {
        id: team.id,
        name: team.name,
    }))
}

pub async fn create(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(req): Json<TaskCreate>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate()?;
    let team = team_ref(&state, req.team_id).await?;

    let task = Task {
        id: Uuid::now_v7(),
        title: req.title.trim().to_string(),
        description: req.description,
        status: TaskStatus::Todo,
        team,
        assignee_id: req.assignee_id,
        due_date: req.due_date,
        created_at: Utc::now(),
    };
    state.tasks.create_task(&task).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Partial update; a board drag arrives as a lone `status` field.
pub async fn update(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<TaskUpdate>,
) -> ApiResult<Json<Task>> {
    let mut task = state
        .tasks
        .task_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Task"))?;

    if let Some(title) = patch.title {
        if title.trim().is_empty() {
            return Err(AppError::validation("Title is required").into());
        }
        task.title = title.trim().to_string();
    }
    if patch.description.is_some() {
        task.description = patch.description;
    }
    if let Some(status) = patch.status {
        task.status = status;
    }
    if patch.team_id.is_some() {
        task.team = team_ref(&state, patch.team_id).await?;
    }
    if patch.assignee_id.is_some() {
        task.assignee_id = patch.assignee_id;
    }
    if patch.due_date.is_some() {
        task.due_date = patch.due_date;
    }

    if !state.tasks.update_task(&task).await? {
        return Err(AppError::not_found("Task").into());
    }
    Ok(Json(task))
}

pub async fn remove(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if !state.tasks.delete_task(id).await? {
        return Err(AppError::not_found("Task").into());
    }
    Ok(StatusCode::NO_CONTENT)
}
