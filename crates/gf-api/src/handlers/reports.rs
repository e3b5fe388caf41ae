//! Meeting reports (minutes).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use gf_core::error::AppError;
use gf_core::models::{Report, ReportCreate};

use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub meeting_id: Option<Uuid>,
}

pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<Vec<Report>>> {
    Ok(Json(state.reports.list_reports(query.meeting_id).await?))
}

pub async fn show(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Report>> {
    let report = state
        .reports
        .report_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Report"))?;
    Ok(Json(report))
}

pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<ReportCreate>,
) -> ApiResult<(StatusCode, Json<Report>)> {
    user.require_exco()?;
    let meeting_id = req.validate()?;
    if state.meetings.meeting_by_id(meeting_id).await?.is_none() {
        return Err(AppError::not_found("Meeting").into());
    }

    let report = Report {
        id: Uuid::now_v7(),
        meeting_id,
        title: req.title.trim().to_string(),
        body: req.body.trim().to_string(),
        created_by: user.id(),
        created_at: Utc::now(),
    };
    state.reports.create_report(&report).await?;
    Ok((StatusCode::CREATED, Json(report)))
}
