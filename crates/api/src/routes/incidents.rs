//! Route definitions for the `/incidents` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::incidents;
use crate::state::AppState;

/// Routes mounted at `/incidents`.
///
/// ```text
/// GET    /               -> list_incidents (staff)
/// POST   /               -> create_incident (optional auth)
/// GET    /mine           -> list_my_incidents
/// GET    /stats          -> incident_stats (staff)
/// GET    /{id}           -> get_incident
/// PUT    /{id}           -> update_incident (staff)
/// DELETE /{id}           -> delete_incident (admin)
/// PUT    /{id}/status    -> update_incident_status (staff)
/// PUT    /{id}/priority  -> update_incident_priority (staff)
/// PUT    /{id}/assign    -> assign_catchers (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(incidents::list_incidents).post(incidents::create_incident),
        )
        .route("/mine", get(incidents::list_my_incidents))
        .route("/stats", get(incidents::incident_stats))
        .route(
            "/{id}",
            get(incidents::get_incident)
                .put(incidents::update_incident)
                .delete(incidents::delete_incident),
        )
        .route("/{id}/status", put(incidents::update_incident_status))
        .route("/{id}/priority", put(incidents::update_incident_priority))
        .route("/{id}/assign", put(incidents::assign_catchers))
}
