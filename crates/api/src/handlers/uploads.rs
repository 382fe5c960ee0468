//! Handler for multipart file uploads.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use formcraft_core::uploads::{validate_upload_size, StoredFile};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/upload
///
/// Accepts a multipart form with a required `file` field. Other fields are
/// ignored.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<StoredFile>>)> {
    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file_data = Some((filename, data.to_vec()));
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("No file uploaded".into()))?;
    validate_upload_size(data.len(), state.config.max_upload_bytes)?;

    let stored = state.files.store(&filename, &data).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: stored })))
}
