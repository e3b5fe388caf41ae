//! Member directory.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use gf_core::error::AppError;
use gf_core::models::{User, UserUpdate};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.users.list_users().await?))
}

pub async fn show(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<User>> {
    let user = state
        .users
        .user_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    Ok(Json(user))
}

/// Members may edit their own profile; only the committee edits other
/// accounts or grants roles.
pub async fn update(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<UserUpdate>,
) -> ApiResult<Json<User>> {
    if caller.id() != id {
        caller.require_exco()?;
    }
    if patch.role.is_some() && !caller.is_exco() {
        return Err(AppError::Forbidden("ExCo role required".into()).into());
    }

    let mut user = state
        .users
        .user_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    if let Some(name) = patch.name {
        if name.trim().is_empty() {
            return Err(AppError::validation("Name is required").into());
        }
        user.name = name.trim().to_string();
    }
    if let Some(email) = patch.email {
        let email = email.trim().to_string();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("Valid email is required").into());
        }
        // Taking over another account's email is a conflict; keeping your own
        // on a no-op save is fine.
        if let Some(existing) = state.users.user_by_email(&email).await? {
            if existing.id != id {
                return Err(AppError::conflict("Email already registered").into());
            }
        }
        user.email = email;
    }
    if let Some(role) = patch.role {
        user.role = role;
    }
    let password_hash = match patch.password.as_deref() {
        Some(password) if password.len() < 6 => {
            return Err(
                AppError::validation("Password must be at least 6 characters").into(),
            )
        }
        Some(password) => Some(state.auth.hash_password(password)?),
        None => None,
    };

    if !state
        .users
        .update_user(&user, password_hash.as_deref())
        .await?
    {
        return Err(AppError::not_found("User").into());
    }
    Ok(Json(user))
}

pub async fn remove(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    caller.require_exco()?;
    if !state.users.delete_user(id).await? {
        return Err(AppError::not_found("User").into());
    }
    Ok(StatusCode::NO_CONTENT)
}
