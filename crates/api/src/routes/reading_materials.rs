//! Route definitions for the `/reading-materials` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reading_materials;
use crate::state::AppState;

/// Routes mounted at `/reading-materials`.
///
/// ```text
/// GET    /                  -> list_materials
/// POST   /                  -> create_material (staff)
/// GET    /archive-history   -> archive_history (staff)
/// POST   /bulk-archive      -> bulk_archive (staff)
/// POST   /bulk-publish      -> bulk_publish (staff)
/// GET    /{id}              -> get_material
/// PUT    /{id}              -> update_material (staff)
/// DELETE /{id}              -> delete_material (admin)
/// POST   /{id}/archive      -> archive_material (staff)
/// POST   /{id}/restore      -> restore_material (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(reading_materials::list_materials).post(reading_materials::create_material),
        )
        .route("/archive-history", get(reading_materials::archive_history))
        .route("/bulk-archive", post(reading_materials::bulk_archive))
        .route("/bulk-publish", post(reading_materials::bulk_publish))
        .route(
            "/{id}",
            get(reading_materials::get_material)
                .put(reading_materials::update_material)
                .delete(reading_materials::delete_material),
        )
        .route("/{id}/archive", post(reading_materials::archive_material))
        .route("/{id}/restore", post(reading_materials::restore_material))
}
