//! Handlers for impounded stray animals.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cityvetcare_core::error::CoreError;
use cityvetcare_core::status::{AnimalStatus, StatusFilter};
use cityvetcare_core::types::DbId;
use cityvetcare_core::validation::{
    non_blank, normalize_sex, optional_short_text, require_short_text,
};
use cityvetcare_db::models::stray_animal::{SaveStrayAnimal, UpdateAnimalStatus};
use cityvetcare_db::repositories::StrayAnimalRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::{ListParams, PaginationParams};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "StrayAnimal",
        id,
    })
}

fn validate(input: &SaveStrayAnimal) -> AppResult<Option<&'static str>> {
    require_short_text("tag_code", &input.tag_code)?;
    require_short_text("species", &input.species)?;
    optional_short_text("breed", input.breed.as_deref())?;
    optional_short_text("color", input.color.as_deref())?;
    optional_short_text("location_captured", input.location_captured.as_deref())?;
    Ok(normalize_sex(input.sex.as_deref())?)
}

/// GET /stray-animals
///
/// `status=euthanized` drives the euthanized list; no filter returns all.
pub async fn list_animals(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let status = StatusFilter::<AnimalStatus>::parse(params.status.as_deref())?.only();
    let (limit, offset) = params.pagination();
    let animals = StrayAnimalRepo::list(&state.pool, status, limit, offset).await?;
    Ok(Json(DataResponse { data: animals }))
}

/// GET /stray-animals/available
///
/// Public listing of animals still in custody (open for adoption or
/// redemption).
pub async fn list_available(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = params.resolve();
    let animals =
        StrayAnimalRepo::list(&state.pool, Some(AnimalStatus::InCustody), limit, offset).await?;
    Ok(Json(DataResponse { data: animals }))
}

/// GET /stray-animals/{id}
pub async fn get_animal(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let animal = StrayAnimalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: animal }))
}

/// POST /stray-animals
pub async fn create_animal(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<SaveStrayAnimal>,
) -> AppResult<impl IntoResponse> {
    let sex = validate(&input)?;
    let animal = StrayAnimalRepo::create(&state.pool, &input, sex).await?;
    tracing::info!(
        animal_id = animal.id,
        tag_code = %animal.tag_code,
        user_id = staff.user_id,
        "Stray animal recorded",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: animal })))
}

/// PUT /stray-animals/{id}
pub async fn update_animal(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SaveStrayAnimal>,
) -> AppResult<impl IntoResponse> {
    let sex = validate(&input)?;
    let animal = StrayAnimalRepo::update(&state.pool, id, &input, sex)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(animal_id = id, user_id = staff.user_id, "Stray animal updated");
    Ok(Json(DataResponse { data: animal }))
}

/// PUT /stray-animals/{id}/status
pub async fn update_animal_status(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAnimalStatus>,
) -> AppResult<impl IntoResponse> {
    let status = AnimalStatus::normalize(&input.status)?;
    let notes = non_blank(input.notes.as_deref());
    let animal = StrayAnimalRepo::update_status(&state.pool, id, status, notes)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(
        animal_id = id,
        user_id = staff.user_id,
        status = %status,
        "Stray animal status updated",
    );
    Ok(Json(DataResponse { data: animal }))
}
