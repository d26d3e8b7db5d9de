//! Route definitions for the `/clinics` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::clinics;
use crate::state::AppState;

/// Routes mounted at `/clinics`.
///
/// ```text
/// GET    /         -> list_clinics (public)
/// POST   /         -> create_clinic (admin)
/// GET    /nearby   -> nearby_clinics (public)
/// GET    /{id}     -> get_clinic (public)
/// PUT    /{id}     -> update_clinic (admin)
/// DELETE /{id}     -> delete_clinic (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(clinics::list_clinics).post(clinics::create_clinic),
        )
        .route("/nearby", get(clinics::nearby_clinics))
        .route(
            "/{id}",
            get(clinics::get_clinic)
                .put(clinics::update_clinic)
                .delete(clinics::delete_clinic),
        )
}
