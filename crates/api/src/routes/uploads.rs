//! Route definitions for image upload.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// `POST /upload-images`, with the request body capped at `max_bytes`.
///
/// Mounted both at the root and under `/api`.
pub fn router(max_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/upload-images", post(uploads::upload_images))
        .layer(DefaultBodyLimit::max(max_bytes))
}
