//! Image upload handlers

use std::path::Path as FsPath;

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use shared::models::ImageUploadResponse;

use crate::core::ServerState;
use crate::media::{self, is_valid_public_id};
use crate::utils::{AppError, AppResult, ErrorCode};

/// POST /api/upload - validate, re-encode as JPEG, store
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ImageUploadResponse>)> {
    let mut file_data: Option<Bytes> = None;
    let mut original_filename: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::with_message(ErrorCode::InvalidRequest, format!("Multipart error: {e}"))
    })? {
        let name = field.name().map(|s| s.to_string());
        if matches!(name.as_deref(), Some("file") | Some("image") | Some("")) {
            original_filename = field.file_name().map(|s| s.to_string());
            file_data = Some(field.bytes().await.map_err(|e| {
                AppError::with_message(ErrorCode::InvalidRequest, format!("Read error: {e}"))
            })?);
            break;
        }
    }

    let data = file_data.ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;
    let filename = original_filename.unwrap_or_else(|| "upload.jpg".to_string());

    // CPU-bound decode / encode off the async workers
    let processed = tokio::task::spawn_blocking(move || media::process_upload(&data, &filename))
        .await
        .map_err(|e| AppError::internal(format!("Image task failed: {e}")))??;

    let size = processed.jpeg.len();
    let url = state
        .images
        .put(&processed.public_id, processed.jpeg)
        .await?;

    tracing::info!(
        public_id = %processed.public_id,
        size,
        backend = state.images.backend(),
        "Image uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(ImageUploadResponse {
            url,
            public_id: processed.public_id,
        }),
    ))
}

/// DELETE /api/upload/:public_id
pub async fn remove(
    State(state): State<ServerState>,
    Path(public_id): Path<String>,
) -> AppResult<Json<bool>> {
    if !is_valid_public_id(&public_id) {
        return Err(AppError::new(ErrorCode::ImageNotFound));
    }
    state.images.delete(&public_id).await?;
    tracing::info!(public_id = %public_id, "Image deleted");
    Ok(Json(true))
}

/// GET /uploads/:file - `{public_id}.jpg` from the local image directory
pub async fn serve_local(
    State(state): State<ServerState>,
    Path(file): Path<String>,
) -> AppResult<impl IntoResponse> {
    let public_id = file
        .strip_suffix(".jpg")
        .filter(|id| is_valid_public_id(id))
        .ok_or_else(|| AppError::invalid_request("Invalid filename"))?;

    let path = FsPath::new(&state.config.images.local_dir).join(format!("{public_id}.jpg"));
    let content = tokio::fs::read(&path)
        .await
        .map_err(|_| AppError::new(ErrorCode::ImageNotFound))?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/jpeg"),
            (header::CACHE_CONTROL, "public, max-age=31536000, immutable"),
        ],
        content,
    ))
}
