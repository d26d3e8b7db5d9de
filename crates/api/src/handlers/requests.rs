//! Handlers for adoption and redemption requests.
//!
//! Both workflows share listing, decision and archive logic; the handlers
//! below are generic over [`RequestRecord`] and instantiated per table in
//! the route modules. Only submission differs per kind.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cityvetcare_core::decision::{self, Decision};
use cityvetcare_core::error::CoreError;
use cityvetcare_core::search::like_pattern;
use cityvetcare_core::status::{RequestStatus, StatusFilter};
use cityvetcare_core::types::DbId;
use cityvetcare_core::validation::{non_blank, optional_short_text, require_short_text};
use cityvetcare_db::models::request::{
    CreateAdoptionRequest, CreateRedemptionRequest, DecideRequest, DecisionOutcome,
    RequestFilter, RequestRecord,
};
use cityvetcare_db::repositories::{
    AdoptionRequestRepo, RedemptionRequestRepo, RequestRepo, StrayAnimalRepo,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RequestListParams {
    pub status: Option<String>,
    pub search: Option<String>,
    pub animal_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn not_found<T: RequestRecord>(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: T::KIND.entity_name(),
        id,
    })
}

fn validate_applicant(
    name: &str,
    contact: &str,
    email: Option<&str>,
    address: &str,
) -> AppResult<()> {
    require_short_text("applicant_name", name)?;
    require_short_text("applicant_contact", contact)?;
    optional_short_text("applicant_email", email)?;
    require_short_text("applicant_address", address)?;
    Ok(())
}

/// The target animal must exist and still be in custody.
async fn require_available_animal(state: &AppState, animal_id: DbId) -> AppResult<()> {
    let animal = StrayAnimalRepo::find_by_id(&state.pool, animal_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StrayAnimal",
            id: animal_id,
        }))?;
    decision::validate_animal_available(animal.status)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// POST /adoption-requests
pub async fn create_adoption_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAdoptionRequest>,
) -> AppResult<impl IntoResponse> {
    validate_applicant(
        &input.applicant_name,
        &input.applicant_contact,
        input.applicant_email.as_deref(),
        &input.applicant_address,
    )?;
    require_available_animal(&state, input.animal_id).await?;

    let created = AdoptionRequestRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        request_id = created.id,
        animal_id = created.animal_id,
        user_id = auth.user_id,
        "Adoption request submitted",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// POST /redemption-requests
pub async fn create_redemption_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateRedemptionRequest>,
) -> AppResult<impl IntoResponse> {
    validate_applicant(
        &input.applicant_name,
        &input.applicant_contact,
        input.applicant_email.as_deref(),
        &input.applicant_address,
    )?;
    require_available_animal(&state, input.animal_id).await?;

    let created = RedemptionRequestRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        request_id = created.id,
        animal_id = created.animal_id,
        user_id = auth.user_id,
        "Redemption request submitted",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// GET /{kind}-requests
///
/// Archived requests are hidden unless `status=archived` or `status=all`.
pub async fn list_requests<T: RequestRecord>(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<RequestListParams>,
) -> AppResult<impl IntoResponse> {
    let requested = StatusFilter::<RequestStatus>::parse(params.status.as_deref())?;
    let filter = RequestFilter {
        status: requested.only(),
        include_archived: requested == StatusFilter::All,
        applicant_user_id: None,
        animal_id: params.animal_id,
        search: like_pattern(params.search.as_deref()),
    };
    let (limit, offset) = ListParams {
        limit: params.limit,
        offset: params.offset,
        ..Default::default()
    }
    .pagination();

    let requests = RequestRepo::<T>::list_filtered(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /{kind}-requests/mine
pub async fn list_my_requests<T: RequestRecord>(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let requested = StatusFilter::<RequestStatus>::parse(params.status.as_deref())?;
    let filter = RequestFilter {
        status: requested.only(),
        include_archived: true,
        applicant_user_id: Some(auth.user_id),
        ..Default::default()
    };
    let (limit, offset) = params.pagination();

    let requests = RequestRepo::<T>::list_filtered(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /{kind}-requests/{id}
///
/// Staff can view any request; applicants only their own.
pub async fn get_request<T: RequestRecord>(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = RequestRepo::<T>::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found::<T>(id))?;

    if !auth.is_staff() && request.applicant_user_id() != Some(auth.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only view your own requests".into(),
        )));
    }

    Ok(Json(DataResponse { data: request }))
}

// ---------------------------------------------------------------------------
// Decision / archive
// ---------------------------------------------------------------------------

/// POST /{kind}-requests/{id}/decision
///
/// Body: `{decision: approved|rejected, reason?, notes?}`. `status` is
/// accepted in place of `decision`. Rejection requires a reason. Approval
/// moves the animal to `adopted` / `redeemed` in the same transaction.
pub async fn decide_request<T: RequestRecord>(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DecideRequest>,
) -> AppResult<impl IntoResponse> {
    let raw = non_blank(input.decision.as_deref())
        .or_else(|| non_blank(input.status.as_deref()))
        .ok_or_else(|| AppError::Core(CoreError::Validation("decision is required".into())))?;
    let decision = Decision::normalize(raw)?;

    let current = RequestRepo::<T>::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found::<T>(id))?;
    let target = decision::validate_decision(current.status(), decision, input.reason.as_deref())?;
    let reason = decision::validate_reason(decision, input.reason.as_deref())?;
    let rejection_reason = match decision {
        Decision::Rejected => reason.as_deref(),
        Decision::Approved => None,
    };
    let notes = non_blank(input.notes.as_deref());

    let outcome =
        RequestRepo::<T>::decide(&state.pool, id, target, rejection_reason, notes, staff.user_id)
            .await?;

    let decided = match outcome {
        DecisionOutcome::Decided(request) => request,
        DecisionOutcome::NotPending => {
            return Err(AppError::Core(CoreError::Conflict(
                "Request was decided by someone else".into(),
            )))
        }
        DecisionOutcome::AnimalUnavailable => {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Animal {} is no longer in custody",
                current.animal_id()
            ))))
        }
    };

    tracing::info!(
        request_id = id,
        kind = T::KIND.entity_name(),
        user_id = staff.user_id,
        status = %target,
        "Request decided",
    );

    Ok(Json(DataResponse { data: decided }))
}

/// POST /{kind}-requests/{id}/archive
pub async fn archive_request<T: RequestRecord>(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let current = RequestRepo::<T>::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found::<T>(id))?;
    decision::validate_archive(current.status())?;

    let archived = RequestRepo::<T>::archive(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Conflict("Request is already archived".into())))?;

    tracing::info!(
        request_id = id,
        kind = T::KIND.entity_name(),
        user_id = staff.user_id,
        "Request archived",
    );

    Ok(Json(DataResponse { data: archived }))
}
