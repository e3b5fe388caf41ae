//! Bearer-token request extractors.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use gf_core::error::AppError;
use gf_core::models::{TokenClaims, UserRole};

use crate::error::ApiError;
use crate::AppState;

/// The verified identity of the caller. Extracting this rejects the request
/// with 401 when the Authorization header is missing or the token does not
/// verify.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub TokenClaims);

impl CurrentUser {
    pub fn id(&self) -> Uuid {
        self.0.sub
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn is_exco(&self) -> bool {
        self.0.role == UserRole::Exco
    }

    /// Committee-only routes call this first.
    pub fn require_exco(&self) -> Result<(), ApiError> {
        if self.is_exco() {
            Ok(())
        } else {
            Err(AppError::Forbidden("ExCo role required".into()).into())
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError(AppError::Unauthorized("Authentication required".into())))?;
        let claims = state
            .auth
            .verify_token(token)
            .map_err(|_| ApiError(AppError::Unauthorized("Invalid or expired token".into())))?;
        Ok(CurrentUser(claims))
    }
}

// Lets handlers take `Option<CurrentUser>` on routes that are public but show
// more when authenticated (slug reads of draft pages).
impl OptionalFromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(
            <CurrentUser as FromRequestParts<AppState>>::from_request_parts(parts, state)
                .await
                .ok(),
        )
    }
}
