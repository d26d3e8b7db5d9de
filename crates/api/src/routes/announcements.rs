//! Route definitions for the `/announcements` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::announcements;
use crate::state::AppState;

/// Routes mounted at `/announcements`.
///
/// ```text
/// GET    /               -> list_announcements (public)
/// POST   /               -> create_announcement (staff)
/// GET    /feed           -> feed
/// GET    /unread-count   -> unread_count
/// POST   /read-all       -> mark_all_read
/// GET    /{id}           -> get_announcement
/// PUT    /{id}           -> update_announcement (staff)
/// DELETE /{id}           -> delete_announcement (admin)
/// PUT    /{id}/status    -> update_announcement_status (staff)
/// POST   /{id}/read      -> mark_read
/// POST   /{id}/hide      -> hide
/// POST   /{id}/unhide    -> unhide
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(announcements::list_announcements).post(announcements::create_announcement),
        )
        .route("/feed", get(announcements::feed))
        .route("/unread-count", get(announcements::unread_count))
        .route("/read-all", post(announcements::mark_all_read))
        .route(
            "/{id}",
            get(announcements::get_announcement)
                .put(announcements::update_announcement)
                .delete(announcements::delete_announcement),
        )
        .route("/{id}/status", put(announcements::update_announcement_status))
        .route("/{id}/read", post(announcements::mark_read))
        .route("/{id}/hide", post(announcements::hide))
        .route("/{id}/unhide", post(announcements::unhide))
}
