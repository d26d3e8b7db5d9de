//! Handlers for pet owners, pets and vaccination records.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use cityvetcare_core::error::CoreError;
use cityvetcare_core::search::like_pattern;
use cityvetcare_core::types::{Date, DbId};
use cityvetcare_core::vaccination::{due_window_end, validate_record};
use cityvetcare_core::validation::{normalize_sex, optional_short_text, require_short_text};
use cityvetcare_db::models::vaccination::{CreatePet, CreatePetOwner, SaveVaccinationRecord};
use cityvetcare_db::repositories::{PetOwnerRepo, PetRepo, VaccinationRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::{ListParams, PaginationParams};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PetListParams {
    pub owner_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `?before=YYYY-MM-DD` takes precedence over `?days=N`.
#[derive(Debug, Deserialize)]
pub struct DueParams {
    pub before: Option<Date>,
    pub days: Option<i64>,
}

fn pet_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Pet", id })
}

fn record_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "VaccinationRecord",
        id,
    })
}

// ---------------------------------------------------------------------------
// Pet owners
// ---------------------------------------------------------------------------

/// GET /pet-owners
pub async fn list_owners(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let search = like_pattern(params.search.as_deref());
    let (limit, offset) = params.pagination();
    let owners = PetOwnerRepo::list(&state.pool, search.as_deref(), limit, offset).await?;
    Ok(Json(DataResponse { data: owners }))
}

/// POST /pet-owners
pub async fn create_owner(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreatePetOwner>,
) -> AppResult<impl IntoResponse> {
    require_short_text("full_name", &input.full_name)?;
    optional_short_text("contact_number", input.contact_number.as_deref())?;
    optional_short_text("email", input.email.as_deref())?;

    let owner = PetOwnerRepo::create(&state.pool, &input).await?;
    tracing::info!(owner_id = owner.id, user_id = staff.user_id, "Pet owner registered");
    Ok((StatusCode::CREATED, Json(DataResponse { data: owner })))
}

// ---------------------------------------------------------------------------
// Pets
// ---------------------------------------------------------------------------

/// GET /pets
pub async fn list_pets(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<PetListParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();
    let pets = PetRepo::list(&state.pool, params.owner_id, limit, offset).await?;
    Ok(Json(DataResponse { data: pets }))
}

/// POST /pets
pub async fn create_pet(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreatePet>,
) -> AppResult<impl IntoResponse> {
    require_short_text("name", &input.name)?;
    require_short_text("species", &input.species)?;
    optional_short_text("breed", input.breed.as_deref())?;
    let sex = normalize_sex(input.sex.as_deref())?;
    if input.birth_date.is_some_and(|d| d > Utc::now().date_naive()) {
        return Err(AppError::Core(CoreError::Validation(
            "birth_date cannot be in the future".into(),
        )));
    }
    PetOwnerRepo::find_by_id(&state.pool, input.owner_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PetOwner",
            id: input.owner_id,
        }))?;

    let pet = PetRepo::create(&state.pool, &input, sex).await?;
    tracing::info!(
        pet_id = pet.id,
        owner_id = pet.owner_id,
        user_id = staff.user_id,
        "Pet registered"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: pet })))
}

/// GET /pets/{id}/vaccinations
pub async fn list_pet_vaccinations(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Path(pet_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    PetRepo::find_by_id(&state.pool, pet_id)
        .await?
        .ok_or_else(|| pet_not_found(pet_id))?;
    let records = VaccinationRepo::list_for_pet(&state.pool, pet_id).await?;
    Ok(Json(DataResponse { data: records }))
}

// ---------------------------------------------------------------------------
// Vaccination records
// ---------------------------------------------------------------------------

fn validate(input: &SaveVaccinationRecord) -> AppResult<()> {
    validate_record(
        &input.vaccine_name,
        input.date_given,
        input.next_due_date,
        Utc::now().date_naive(),
    )?;
    optional_short_text("lot_number", input.lot_number.as_deref())?;
    optional_short_text("veterinarian", input.veterinarian.as_deref())?;
    Ok(())
}

/// POST /vaccinations
pub async fn create_record(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<SaveVaccinationRecord>,
) -> AppResult<impl IntoResponse> {
    validate(&input)?;
    PetRepo::find_by_id(&state.pool, input.pet_id)
        .await?
        .ok_or_else(|| pet_not_found(input.pet_id))?;

    let record = VaccinationRepo::create(&state.pool, staff.user_id, &input).await?;
    tracing::info!(
        record_id = record.id,
        pet_id = record.pet_id,
        user_id = staff.user_id,
        "Vaccination recorded",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// PUT /vaccinations/{id}
pub async fn update_record(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SaveVaccinationRecord>,
) -> AppResult<impl IntoResponse> {
    validate(&input)?;
    let record = VaccinationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| record_not_found(id))?;
    tracing::info!(record_id = id, user_id = staff.user_id, "Vaccination record updated");
    Ok(Json(DataResponse { data: record }))
}

/// DELETE /vaccinations/{id}
pub async fn delete_record(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !VaccinationRepo::delete(&state.pool, id).await? {
        return Err(record_not_found(id));
    }
    tracing::info!(record_id = id, user_id = staff.user_id, "Vaccination record deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /vaccinations/due
///
/// Vaccinations with a next due date up to `before` (inclusive), or
/// within `days` of today (default 30). Overdue records are included.
pub async fn list_due(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<DueParams>,
) -> AppResult<impl IntoResponse> {
    let until = params
        .before
        .unwrap_or_else(|| due_window_end(Utc::now().date_naive(), params.days));
    let due = VaccinationRepo::list_due(&state.pool, until).await?;
    Ok(Json(DataResponse { data: due }))
}
