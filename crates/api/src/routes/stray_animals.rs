//! Route definitions for the `/stray-animals` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::stray_animals;
use crate::state::AppState;

/// Routes mounted at `/stray-animals`.
///
/// ```text
/// GET  /             -> list_animals (staff)
/// POST /             -> create_animal (staff)
/// GET  /available    -> list_available (public)
/// GET  /{id}         -> get_animal
/// PUT  /{id}         -> update_animal (staff)
/// PUT  /{id}/status  -> update_animal_status (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(stray_animals::list_animals).post(stray_animals::create_animal),
        )
        .route("/available", get(stray_animals::list_available))
        .route(
            "/{id}",
            get(stray_animals::get_animal).put(stray_animals::update_animal),
        )
        .route("/{id}/status", put(stray_animals::update_animal_status))
}
