//! Meetings, signup, roster, and attendance.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use uuid::Uuid;

use gf_core::error::AppError;
use gf_core::models::{
    AttendanceUpdate, Meeting, MeetingCreate, MeetingUpdate, Registration, RegistrationCreate,
    RegistrationUpdate,
};

use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<Vec<Meeting>>> {
    Ok(Json(state.meetings.list_meetings().await?))
}

pub async fn show(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Meeting>> {
    let meeting = state
        .meetings
        .meeting_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Meeting"))?;
    Ok(Json(meeting))
}

pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<MeetingCreate>,
) -> ApiResult<(StatusCode, Json<Meeting>)> {
    user.require_exco()?;
    req.validate()?;
    let date = req
        .date
        .ok_or_else(|| AppError::validation("Date is required"))?;

    let meeting = Meeting {
        id: Uuid::now_v7(),
        title: req.title.trim().to_string(),
        theme: req.theme,
        date,
        location: req.location,
        description: req.description,
        created_at: Utc::now(),
    };
    state.meetings.create_meeting(&meeting).await?;
    Ok((StatusCode::CREATED, Json(meeting)))
}

pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<MeetingUpdate>,
) -> ApiResult<Json<Meeting>> {
    user.require_exco()?;

    let mut meeting = state
        .meetings
        .meeting_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Meeting"))?;

    if let Some(title) = patch.title {
        if title.trim().is_empty() {
            return Err(AppError::validation("Title is required").into());
        }
        meeting.title = title.trim().to_string();
    }
    if patch.theme.is_some() {
        meeting.theme = patch.theme;
    }
    if let Some(date) = patch.date {
        meeting.date = date;
    }
    if patch.location.is_some() {
        meeting.location = patch.location;
    }
    if patch.description.is_some() {
        meeting.description = patch.description;
    }

    if !state.meetings.update_meeting(&meeting).await? {
        return Err(AppError::not_found("Meeting").into());
    }
    Ok(Json(meeting))
}

pub async fn remove(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    user.require_exco()?;
    if !state.meetings.delete_meeting(id).await? {
        return Err(AppError::not_found("Meeting").into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Signs the caller up for a meeting, at most once.
pub async fn register(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(meeting_id): Path<Uuid>,
    Json(req): Json<RegistrationCreate>,
) -> ApiResult<(StatusCode, Json<Registration>)> {
    // 1. The meeting must exist.
    if state.meetings.meeting_by_id(meeting_id).await?.is_none() {
        return Err(AppError::not_found("Meeting").into());
    }

    // 2. One signup per member per meeting.
    if state
        .meetings
        .registration_for(meeting_id, user.id())
        .await?
        .is_some()
    {
        return Err(AppError::conflict("Already registered for this meeting").into());
    }

    // 3. Persist. Attendance starts false and is marked later by the ExCo.
    let now = Utc::now();
    let registration = Registration {
        id: Uuid::now_v7(),
        meeting_id,
        user_id: user.id(),
        user_name: user.name().to_string(),
        role: req.role,
        speech_title: req.speech_title,
        speech_objectives: req.speech_objectives,
        attended: false,
        created_at: now,
        updated_at: now,
    };
    state.meetings.create_registration(&registration).await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

/// Replaces the caller's role and speech details wholesale; the form always
/// submits all three fields together.
pub async fn update_registration(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(meeting_id): Path<Uuid>,
    Json(req): Json<RegistrationUpdate>,
) -> ApiResult<Json<Registration>> {
    let mut registration = state
        .meetings
        .registration_for(meeting_id, user.id())
        .await?
        .ok_or_else(|| AppError::not_found("Registration"))?;

    registration.role = req.role;
    registration.speech_title = req.speech_title;
    registration.speech_objectives = req.speech_objectives;
    registration.updated_at = Utc::now();

    if !state
        .meetings
        .update_registration(&registration)
        .await?
    {
        return Err(AppError::not_found("Registration").into());
    }
    Ok(Json(registration))
}

pub async fn registrations(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(meeting_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Registration>>> {
    if state.meetings.meeting_by_id(meeting_id).await?.is_none() {
        return Err(AppError::not_found("Meeting").into());
    }
    Ok(Json(
        state.meetings.registrations_for_meeting(meeting_id).await?,
    ))
}

pub async fn attendance(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(meeting_id): Path<Uuid>,
    Json(req): Json<AttendanceUpdate>,
) -> ApiResult<StatusCode> {
    user.require_exco()?;
    let target = req.validate()?;

    if !state
        .meetings
        .set_attendance(meeting_id, target, req.attended)
        .await?
    {
        return Err(AppError::not_found("Registration").into());
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

    fn sample_meeting(id: Uuid) -> Meeting {
        Meeting {
            id,
            title: "June Chapter Meeting".into(),
            theme: Some("Growth".into()),
            date: Utc::now(),
            location: Some("Room 12".into()),
            description: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn members_cannot_create_meetings() {
        let mut mocks = Mocks::default();
        authorize(&mut mocks, UserRole::Member);

        let body = json!({"title": "Sneaky Meeting", "date": "2026-06-01T10:00:00Z"});
        let (status, body) = request(
            router(mocks.build()),
            "POST",
            "/api/meetings",
            Some("token"),
            Some(body),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "ExCo role required");
    }

    #[tokio::test]
    async fn create_requires_a_date() {
        let mut mocks = Mocks::default();
        authorize(&mut mocks, UserRole::Exco);

        let (status, body) = request(
            router(mocks.build()),
            "POST",
            "/api/meetings",
            Some("token"),
            Some(json!({"title": "June Chapter Meeting"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Date is required");
    }

    #[tokio::test]
    async fn second_signup_for_the_same_meeting_is_rejected() {
        let mut mocks = Mocks::default();
        let granted = authorize(&mut mocks, UserRole::Member);
        let meeting_id = Uuid::now_v7();

        mocks
            .meetings
            .expect_meeting_by_id()
            .returning(move |id| Ok(Some(sample_meeting(id))));
        let user_id = granted.sub;
        mocks.meetings.expect_registration_for().returning(
            move |meeting_id, _| {
                Ok(Some(Registration {
                    id: Uuid::now_v7(),
                    meeting_id,
                    user_id,
                    user_name: "Test Member".into(),
                    role: None,
                    speech_title: None,
                    speech_objectives: None,
                    attended: false,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                }))
            },
        );

        let (status, body) = request(
            router(mocks.build()),
            "POST",
            &format!("/api/meetings/{meeting_id}/register"),
            Some("token"),
            Some(json!({"role": "Speaker"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Already registered for this meeting");
    }

    #[tokio::test]
    async fn signup_carries_the_callers_name_into_the_roster_row() {
        let mut mocks = Mocks::default();
        authorize(&mut mocks, UserRole::Member);
        let meeting_id = Uuid::now_v7();

        mocks
            .meetings
            .expect_meeting_by_id()
            .returning(move |id| Ok(Some(sample_meeting(id))));
        mocks
            .meetings
            .expect_registration_for()
            .returning(|_, _| Ok(None));
        mocks
            .meetings
            .expect_create_registration()
            .returning(|_| Ok(()));

        let body = json!({
            "role": "Speaker",
            "speechTitle": "Icebreaker",
            "speechObjectives": "Introduce myself"
        });
        let (status, body) = request(
            router(mocks.build()),
            "POST",
            &format!("/api/meetings/{meeting_id}/register"),
            Some("token"),
            Some(body),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["userName"], "Test Member");
        assert_eq!(body["speechTitle"], "Icebreaker");
        assert_eq!(body["attended"], false);
    }

    #[tokio::test]
    async fn attendance_for_an_unregistered_member_is_404() {
        let mut mocks = Mocks::default();
        authorize(&mut mocks, UserRole::Exco);
        mocks
            .meetings
            .expect_set_attendance()
            .returning(|_, _, _| Ok(false));

        let body = json!({"userId": Uuid::now_v7(), "attended": true});
        let (status, body) = request(
            router(mocks.build()),
            "PUT",
            &format!("/api/meetings/{}/attendance", Uuid::now_v7()),
            Some("token"),
            Some(body),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Registration not found");
    }
}
