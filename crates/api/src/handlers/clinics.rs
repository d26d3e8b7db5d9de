//! Handlers for the veterinary clinic directory.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cityvetcare_core::error::CoreError;
use cityvetcare_core::geo::{clamp_radius, distance_km, validate_coordinates};
use cityvetcare_core::status::{ClinicStatus, StatusFilter};
use cityvetcare_core::types::DbId;
use cityvetcare_core::validation::{non_blank, optional_short_text, require_short_text};
use cityvetcare_db::models::clinic::{NearbyClinic, SaveClinic};
use cityvetcare_db::repositories::ClinicRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ClinicListParams {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub lat: f64,
    pub lng: f64,
    pub radius_km: Option<f64>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Clinic",
        id,
    })
}

fn validate(input: &SaveClinic) -> AppResult<Option<ClinicStatus>> {
    require_short_text("name", &input.name)?;
    require_short_text("address", &input.address)?;
    validate_coordinates(input.latitude, input.longitude)?;
    optional_short_text("contact_number", input.contact_number.as_deref())?;
    optional_short_text("email", input.email.as_deref())?;
    Ok(non_blank(input.status.as_deref())
        .map(ClinicStatus::normalize)
        .transpose()?)
}

/// GET /clinics
///
/// Defaults to active clinics; `status=all` lists every clinic.
pub async fn list_clinics(
    State(state): State<AppState>,
    Query(params): Query<ClinicListParams>,
) -> AppResult<impl IntoResponse> {
    let status = match StatusFilter::<ClinicStatus>::parse(params.status.as_deref())? {
        StatusFilter::Default => Some(ClinicStatus::Active),
        StatusFilter::All => None,
        StatusFilter::Only(status) => Some(status),
    };
    let clinics = ClinicRepo::list(&state.pool, status).await?;
    Ok(Json(DataResponse { data: clinics }))
}

/// GET /clinics/nearby?lat=&lng=&radius_km=
///
/// Active clinics within the radius, closest first.
pub async fn nearby_clinics(
    State(state): State<AppState>,
    Query(params): Query<NearbyParams>,
) -> AppResult<impl IntoResponse> {
    validate_coordinates(params.lat, params.lng)?;
    let radius = clamp_radius(params.radius_km);

    let mut nearby: Vec<NearbyClinic> = ClinicRepo::list(&state.pool, Some(ClinicStatus::Active))
        .await?
        .into_iter()
        .map(|clinic| {
            let distance_km =
                distance_km(params.lat, params.lng, clinic.latitude, clinic.longitude);
            NearbyClinic {
                clinic,
                distance_km,
            }
        })
        .filter(|c| c.distance_km <= radius)
        .collect();
    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    Ok(Json(DataResponse { data: nearby }))
}

/// GET /clinics/{id}
pub async fn get_clinic(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let clinic = ClinicRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: clinic }))
}

/// POST /clinics
pub async fn create_clinic(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<SaveClinic>,
) -> AppResult<impl IntoResponse> {
    let status = validate(&input)?.unwrap_or(ClinicStatus::Active);
    let clinic = ClinicRepo::create(&state.pool, &input, status).await?;
    tracing::info!(clinic_id = clinic.id, user_id = admin.user_id, "Clinic created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: clinic })))
}

/// PUT /clinics/{id}
///
/// Omitting `status` keeps the current one.
pub async fn update_clinic(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SaveClinic>,
) -> AppResult<impl IntoResponse> {
    let status = validate(&input)?;
    let clinic = ClinicRepo::update(&state.pool, id, &input, status)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(clinic_id = id, user_id = admin.user_id, "Clinic updated");
    Ok(Json(DataResponse { data: clinic }))
}

/// DELETE /clinics/{id}
pub async fn delete_clinic(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ClinicRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(clinic_id = id, user_id = admin.user_id, "Clinic deleted");
    Ok(StatusCode::NO_CONTENT)
}
