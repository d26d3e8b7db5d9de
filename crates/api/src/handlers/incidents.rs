//! Handlers for citizen incident reports.
//!
//! Submission is open to anonymous callers (emergency reports); triage,
//! assignment and statistics require staff.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cityvetcare_core::error::CoreError;
use cityvetcare_core::incident::{self, ReportFields};
use cityvetcare_core::search::like_pattern;
use cityvetcare_core::status::{IncidentStatus, IncidentType, Priority, StatusFilter};
use cityvetcare_core::types::DbId;
use cityvetcare_core::validation::non_blank;
use cityvetcare_db::models::incident::{
    AssignCatchers, CreateIncident, IncidentFilter, UpdateIncident, UpdateIncidentPriority,
    UpdateIncidentStatus,
};
use cityvetcare_db::models::StatusCount;
use cityvetcare_db::repositories::{CatcherTeamRepo, IncidentRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /incidents`.
#[derive(Debug, Deserialize)]
pub struct IncidentListParams {
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(rename = "type")]
    pub incident_type: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response body for `GET /incidents/stats`.
#[derive(Debug, Serialize)]
pub struct IncidentStats {
    pub total: i64,
    pub by_status: Vec<StatusCount>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Incident",
        id,
    })
}

// ---------------------------------------------------------------------------
// POST /incidents
// ---------------------------------------------------------------------------

/// Submit a report. Always created as `pending`.
pub async fn create_incident(
    MaybeAuthUser(auth): MaybeAuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateIncident>,
) -> AppResult<impl IntoResponse> {
    let incident_type = IncidentType::normalize(&input.incident_type)?;
    let priority = non_blank(input.priority.as_deref())
        .map(Priority::normalize)
        .transpose()?
        .unwrap_or(Priority::Medium);

    incident::validate_report(&ReportFields {
        description: &input.description,
        address: &input.address,
        latitude: input.latitude,
        longitude: input.longitude,
        reporter_name: input.reporter_name.as_deref(),
        reporter_contact: input.reporter_contact.as_deref(),
        animal_count: input.animal_count,
        image_count: input.images.len(),
        authenticated: auth.is_some(),
    })?;

    let reporter_user_id = auth.as_ref().map(|u| u.user_id);
    let created = IncidentRepo::create(
        &state.pool,
        reporter_user_id,
        &input,
        incident_type,
        priority,
    )
    .await?;

    tracing::info!(
        incident_id = created.id,
        reporter_user_id = ?reporter_user_id,
        incident_type = %incident_type,
        "Incident report submitted",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// GET /incidents, /incidents/mine
// ---------------------------------------------------------------------------

/// Staff listing with status, priority, type and free-text filters.
pub async fn list_incidents(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<IncidentListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = IncidentFilter {
        status: StatusFilter::<IncidentStatus>::parse(params.status.as_deref())?.only(),
        priority: StatusFilter::<Priority>::parse(params.priority.as_deref())?.only(),
        incident_type: StatusFilter::<IncidentType>::parse(params.incident_type.as_deref())?
            .only(),
        reporter_user_id: None,
        search: like_pattern(params.search.as_deref()),
    };
    let (limit, offset) = ListParams {
        limit: params.limit,
        offset: params.offset,
        ..Default::default()
    }
    .pagination();

    let incidents = IncidentRepo::list_filtered(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: incidents }))
}

/// The caller's own reports ("My Reports").
pub async fn list_my_incidents(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = IncidentFilter {
        status: StatusFilter::<IncidentStatus>::parse(params.status.as_deref())?.only(),
        reporter_user_id: Some(auth.user_id),
        search: like_pattern(params.search.as_deref()),
        ..Default::default()
    };
    let (limit, offset) = params.pagination();

    let incidents = IncidentRepo::list_filtered(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: incidents }))
}

// ---------------------------------------------------------------------------
// GET /incidents/stats
// ---------------------------------------------------------------------------

pub async fn incident_stats(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let by_status = IncidentRepo::count_by_status(&state.pool).await?;
    let total = by_status.iter().map(|c| c.count).sum();
    Ok(Json(DataResponse {
        data: IncidentStats { total, by_status },
    }))
}

// ---------------------------------------------------------------------------
// GET /incidents/{id}
// ---------------------------------------------------------------------------

/// Staff can view any report; citizens only their own.
pub async fn get_incident(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let incident = IncidentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if !auth.is_staff() && incident.reporter_user_id != Some(auth.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only view your own reports".into(),
        )));
    }

    Ok(Json(DataResponse { data: incident }))
}

// ---------------------------------------------------------------------------
// PUT /incidents/{id}
// ---------------------------------------------------------------------------

pub async fn update_incident(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateIncident>,
) -> AppResult<impl IntoResponse> {
    let incident_type = IncidentType::normalize(&input.incident_type)?;
    incident::validate_report(&ReportFields {
        description: &input.description,
        address: &input.address,
        latitude: input.latitude,
        longitude: input.longitude,
        reporter_name: None,
        reporter_contact: None,
        animal_count: input.animal_count,
        image_count: input.images.len(),
        authenticated: true,
    })?;

    let updated = IncidentRepo::update(&state.pool, id, &input, incident_type)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(incident_id = id, user_id = staff.user_id, "Incident updated");

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// PUT /incidents/{id}/status
// ---------------------------------------------------------------------------

/// Set the report's status. Accepts legacy spellings ("In Progress").
pub async fn update_incident_status(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateIncidentStatus>,
) -> AppResult<impl IntoResponse> {
    let status = IncidentStatus::normalize(&input.status)?;
    let remarks = non_blank(input.remarks.as_deref());
    incident::validate_status_change(status, remarks)?;

    let updated = IncidentRepo::update_status(&state.pool, id, status, remarks)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        incident_id = id,
        user_id = staff.user_id,
        status = %status,
        "Incident status updated",
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// PUT /incidents/{id}/priority
// ---------------------------------------------------------------------------

pub async fn update_incident_priority(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateIncidentPriority>,
) -> AppResult<impl IntoResponse> {
    let priority = Priority::normalize(&input.priority)?;

    let updated = IncidentRepo::update_priority(&state.pool, id, priority)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        incident_id = id,
        user_id = staff.user_id,
        priority = %priority,
        "Incident priority updated",
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// PUT /incidents/{id}/assign
// ---------------------------------------------------------------------------

/// Replace the catcher teams assigned to a report.
///
/// Every id must name an active team. Reports still pending or approved
/// move to `scheduled_for_patrol` in the same transaction.
pub async fn assign_catchers(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AssignCatchers>,
) -> AppResult<impl IntoResponse> {
    let mut team_ids = input.catcher_team_ids;
    team_ids.sort_unstable();
    team_ids.dedup();

    if !team_ids.is_empty() {
        let active = CatcherTeamRepo::active_ids(&state.pool, &team_ids).await?;
        let unknown: Vec<String> = team_ids
            .iter()
            .filter(|id| !active.contains(*id))
            .map(|id| id.to_string())
            .collect();
        if !unknown.is_empty() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown or inactive catcher team(s): {}",
                unknown.join(", ")
            ))));
        }
    }

    let current = IncidentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let next_status = if team_ids.is_empty() {
        None
    } else {
        incident::status_after_assignment(current.status)
    };

    let updated = IncidentRepo::assign_teams(&state.pool, id, &team_ids, staff.user_id, next_status)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        incident_id = id,
        user_id = staff.user_id,
        team_count = team_ids.len(),
        "Catcher teams assigned",
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /incidents/{id}
// ---------------------------------------------------------------------------

pub async fn delete_incident(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !IncidentRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(incident_id = id, user_id = admin.user_id, "Incident deleted");
    Ok(StatusCode::NO_CONTENT)
}
