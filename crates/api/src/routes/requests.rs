//! Route definitions for `/adoption-requests` and `/redemption-requests`.

use axum::routing::{get, post};
use axum::Router;
use cityvetcare_db::models::request::{AdoptionRequest, RedemptionRequest, RequestRecord};

use crate::handlers::requests;
use crate::state::AppState;

/// Shared routes for one request table.
///
/// ```text
/// GET  /                -> list_requests (staff)
/// GET  /mine            -> list_my_requests
/// GET  /{id}            -> get_request
/// POST /{id}/decision   -> decide_request (staff)
/// POST /{id}/archive    -> archive_request (staff)
/// ```
fn shared<T: RequestRecord>() -> Router<AppState> {
    Router::new()
        .route("/mine", get(requests::list_my_requests::<T>))
        .route("/{id}/decision", post(requests::decide_request::<T>))
        .route("/{id}/archive", post(requests::archive_request::<T>))
}

/// Routes mounted at `/adoption-requests`. `POST /` submits a request.
pub fn adoption_router() -> Router<AppState> {
    shared::<AdoptionRequest>()
        .route(
            "/",
            get(requests::list_requests::<AdoptionRequest>)
                .post(requests::create_adoption_request),
        )
        .route("/{id}", get(requests::get_request::<AdoptionRequest>))
}

/// Routes mounted at `/redemption-requests`.
///
/// `POST /{id}` is kept as an alias of `POST /{id}/decision` for older
/// clients.
pub fn redemption_router() -> Router<AppState> {
    shared::<RedemptionRequest>()
        .route(
            "/",
            get(requests::list_requests::<RedemptionRequest>)
                .post(requests::create_redemption_request),
        )
        .route(
            "/{id}",
            get(requests::get_request::<RedemptionRequest>)
                .post(requests::decide_request::<RedemptionRequest>),
        )
}
