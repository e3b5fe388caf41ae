//! # AppError
//!
//! Centralized error handling for the GavelFlow ecosystem.
//! Variant messages double as the `{"message": ...}` bodies the REST layer
//! sends, so they are written for end users, not logs.

use thiserror::Error;

/// The primary error type for all gf-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Meeting, Page, Task). Carries the resource name.
    #[error("{0} not found")]
    NotFound(String),

    /// Validation failure (e.g., missing required field, malformed email)
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid credentials/token
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but lacking the required role tier
    #[error("{0}")]
    Forbidden(String),

    /// Resource already exists (e.g., duplicate registration, duplicate email)
    #[error("{0}")]
    Conflict(String),

    /// Infrastructure failure (e.g., DB down). The HTTP layer hides the detail.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(resource: &str) -> Self {
        AppError::NotFound(resource.to_string())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict(message.into())
    }
}

// Port methods return anyhow::Result; handlers funnel those into Internal.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// A specialized Result type for GavelFlow logic.
pub type Result<T> = std::result::Result<T, AppError>;
