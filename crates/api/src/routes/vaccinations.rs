//! Route definitions for pet owners, pets and vaccination records.
//!
//! Merged at the API root because the three resources share no prefix.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::vaccinations;
use crate::state::AppState;

/// ```text
/// GET  /pet-owners               -> list_owners
/// POST /pet-owners               -> create_owner
/// GET  /pets                     -> list_pets
/// POST /pets                     -> create_pet
/// GET  /pets/{id}/vaccinations   -> list_pet_vaccinations
/// POST /vaccinations             -> create_record
/// GET  /vaccinations/due         -> list_due
/// PUT  /vaccinations/{id}        -> update_record
/// DELETE /vaccinations/{id}      -> delete_record
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/pet-owners",
            get(vaccinations::list_owners).post(vaccinations::create_owner),
        )
        .route(
            "/pets",
            get(vaccinations::list_pets).post(vaccinations::create_pet),
        )
        .route(
            "/pets/{id}/vaccinations",
            get(vaccinations::list_pet_vaccinations),
        )
        .route("/vaccinations", post(vaccinations::create_record))
        .route("/vaccinations/due", get(vaccinations::list_due))
        .route(
            "/vaccinations/{id}",
            put(vaccinations::update_record).delete(vaccinations::delete_record),
        )
}
