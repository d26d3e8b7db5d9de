//! Route definitions for the `/catcher-teams` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::catcher_teams;
use crate::state::AppState;

/// Routes mounted at `/catcher-teams`.
///
/// ```text
/// GET  /      -> list_teams
/// POST /      -> create_team
/// PUT  /{id}  -> update_team
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(catcher_teams::list_teams).post(catcher_teams::create_team),
        )
        .route("/{id}", put(catcher_teams::update_team))
}
