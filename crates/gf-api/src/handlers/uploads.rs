//! Multipart uploads for image and attachment blocks.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;

use gf_core::error::AppError;
use gf_core::models::UploadedFile;

use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::AppState;

/// Stores the first non-empty file field and answers with the public URL the
/// editor drops into a block.
pub async fn create(
    State(state): State<AppState>,
    _user: CurrentUser,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<UploadedFile>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::validation(format!("Invalid upload: {err}")))?
    {
        let name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| AppError::validation(format!("Invalid upload: {err}")))?;
        if bytes.is_empty() {
            continue;
        }

        let size = bytes.len() as u64;
        let url = state.media.save_upload(bytes.to_vec(), &name).await?;
        return Ok((StatusCode::CREATED, Json(UploadedFile { url, name, size })));
    }

    Err(AppError::validation("No file provided").into())
}
