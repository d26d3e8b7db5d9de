//! Multipart image upload.
//!
//! Files are stored under the configured upload directory, named by the
//! SHA-256 of their content, and served back from `/uploads/*`.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use cityvetcare_core::error::CoreError;
use cityvetcare_core::upload::{
    content_type_from_name, extension_for, IMAGE_FIELD, MAX_FILES_PER_UPLOAD,
};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::state::AppState;

/// Response body for a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadedImages {
    pub images: Vec<String>,
}

/// Content-addressed file name for an upload.
pub fn stored_file_name(data: &[u8], extension: &str) -> String {
    format!("{:x}.{extension}", Sha256::digest(data))
}

/// POST /upload-images
///
/// Accepts up to ten files in the `images` field. Other fields are
/// ignored. Responds with a bare `201 {images: [url, ...]}` in upload order.
pub async fn upload_images(
    MaybeAuthUser(auth): MaybeAuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadedImages>)> {
    let mut files: Vec<(&'static str, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        if files.len() == MAX_FILES_PER_UPLOAD {
            return Err(AppError::Core(CoreError::Validation(format!(
                "At most {MAX_FILES_PER_UPLOAD} images can be uploaded at once"
            ))));
        }

        let content_type = field
            .content_type()
            .filter(|ct| *ct != "application/octet-stream")
            .map(str::to_string)
            .or_else(|| {
                field
                    .file_name()
                    .and_then(content_type_from_name)
                    .map(str::to_string)
            })
            .unwrap_or_default();
        let extension = extension_for(&content_type)?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if data.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Uploaded image is empty".into(),
            )));
        }
        files.push((extension, data.to_vec()));
    }

    if files.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Missing required '{IMAGE_FIELD}' field"
        )));
    }

    tokio::fs::create_dir_all(&state.config.upload_dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let mut urls = Vec::with_capacity(files.len());
    for (extension, data) in &files {
        let file_name = stored_file_name(data, extension);
        tokio::fs::write(state.config.upload_dir.join(&file_name), data)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;
        urls.push(state.config.upload_url(&file_name));
    }

    tracing::info!(
        count = urls.len(),
        user_id = ?auth.map(|u| u.user_id),
        "Images uploaded",
    );

    Ok((StatusCode::CREATED, Json(UploadedImages { images: urls })))
}
