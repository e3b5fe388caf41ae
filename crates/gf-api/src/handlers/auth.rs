//! Registration, login, and the current-account echo.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use uuid::Uuid;

use gf_core::error::AppError;
use gf_core::models::{AuthResponse, LoginRequest, RegisterRequest, User, UserRole};

use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate()?;

    // 1. Reject duplicate emails up front. The UNIQUE constraint would catch
    //    it anyway, but the signup form wants a readable message.
    if state.users.user_by_email(req.email.trim()).await?.is_some() {
        return Err(AppError::conflict("Email already registered").into());
    }

    // 2. Hash and persist. New accounts always start as regular members.
    let hash = state.auth.hash_password(&req.password)?;
    let user = User {
        id: Uuid::now_v7(),
        name: req.name.trim().to_string(),
        email: req.email.trim().to_string(),
        role: UserRole::Member,
        created_at: Utc::now(),
    };
    state.users.create_user(&user, &hash).await?;

    // 3. Fresh accounts are logged in immediately.
    let token = state.auth.issue_token(&user)?;
    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate()?;

    // Same message for unknown email and wrong password.
    let Some((user, hash)) = state.users.credentials_by_email(req.email.trim()).await? else {
        return Err(AppError::Unauthorized("Invalid email or password".into()).into());
    };
    if !state.auth.verify_password(&req.password, &hash) {
        return Err(AppError::Unauthorized("Invalid email or password".into()).into());
    }

    let token = state.auth.issue_token(&user)?;
    Ok(Json(AuthResponse { token, user }))
}

/// Returns the account behind the presented token, fresh from storage so
/// role changes show up without re-login.
pub async fn me(State(state): State<AppState>, user: CurrentUser) -> ApiResult<Json<User>> {
    let account = state
        .users
        .user_by_id(user.id())
        .await?
        .ok_or_else(|| AppError::Unauthorized("Account no longer exists".into()))?;
    Ok(Json(account))
}
