//! Handlers for reading materials, their archive log and bulk operations.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cityvetcare_core::error::CoreError;
use cityvetcare_core::reading_material::{
    restore_target, validate_archive, validate_bulk_ids, validate_material,
};
use cityvetcare_core::search::like_pattern;
use cityvetcare_core::status::{MaterialStatus, MaterialType, StatusFilter};
use cityvetcare_core::types::DbId;
use cityvetcare_core::validation::{non_blank, optional_short_text};
use cityvetcare_db::models::reading_material::{
    ArchiveReadingMaterial, BulkMaterialIds, BulkOutcome, MaterialFilter, ReadingMaterial,
    SaveReadingMaterial,
};
use cityvetcare_db::repositories::ReadingMaterialRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MaterialListParams {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub material_type: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ArchiveHistoryParams {
    pub material_id: DbId,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ReadingMaterial",
        id,
    })
}

fn validate_save(input: &SaveReadingMaterial) -> AppResult<MaterialType> {
    let material_type = MaterialType::normalize(&input.material_type)?;
    validate_material(
        material_type,
        &input.title,
        input.content.as_deref(),
        input.url.as_deref(),
        input.tags.len(),
    )?;
    optional_short_text("author", input.author.as_deref())?;
    optional_short_text("category", input.category.as_deref())?;
    Ok(material_type)
}

/// Status requested by an authoring call. Archiving has its own endpoint.
fn authored_status(raw: Option<&str>) -> AppResult<Option<MaterialStatus>> {
    match non_blank(raw).map(MaterialStatus::normalize).transpose()? {
        Some(MaterialStatus::Archived) => Err(AppError::BadRequest(
            "Use the archive endpoint to archive a reading material".into(),
        )),
        other => Ok(other),
    }
}

fn bulk_result(outcome: BulkOutcome) -> AppResult<Vec<ReadingMaterial>> {
    match outcome {
        BulkOutcome::Applied(materials) => Ok(materials),
        BulkOutcome::Missing(ids) => Err(AppError::Core(CoreError::Validation(format!(
            "Unknown reading material id(s): {}",
            join_ids(&ids)
        )))),
        BulkOutcome::Conflicting(ids) => Err(AppError::Core(CoreError::Conflict(format!(
            "Reading material(s) in a conflicting status: {}",
            join_ids(&ids)
        )))),
    }
}

fn join_ids(ids: &[DbId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn dedup_ids(mut ids: Vec<DbId>) -> AppResult<Vec<DbId>> {
    ids.sort_unstable();
    ids.dedup();
    validate_bulk_ids(&ids)?;
    Ok(ids)
}

// ---------------------------------------------------------------------------
// GET /reading-materials
// ---------------------------------------------------------------------------

/// List materials. Archived materials are excluded unless `status=archived`
/// or `status=all` is requested. Citizens only ever see published ones.
pub async fn list_materials(
    MaybeAuthUser(auth): MaybeAuthUser,
    State(state): State<AppState>,
    Query(params): Query<MaterialListParams>,
) -> AppResult<impl IntoResponse> {
    let staff = auth.as_ref().is_some_and(AuthUser::is_staff);
    let requested = StatusFilter::<MaterialStatus>::parse(params.status.as_deref())?;

    let (status, include_archived) = if staff {
        (requested.only(), requested == StatusFilter::All)
    } else {
        (Some(MaterialStatus::Published), false)
    };

    let filter = MaterialFilter {
        status,
        include_archived,
        material_type: StatusFilter::<MaterialType>::parse(params.material_type.as_deref())?
            .only(),
        category: non_blank(params.category.as_deref()).map(str::to_string),
        search: like_pattern(params.search.as_deref()),
    };
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();

    let materials = ReadingMaterialRepo::list_filtered(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: materials }))
}

// ---------------------------------------------------------------------------
// GET /reading-materials/{id}
// ---------------------------------------------------------------------------

pub async fn get_material(
    MaybeAuthUser(auth): MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let material = ReadingMaterialRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let staff = auth.as_ref().is_some_and(AuthUser::is_staff);
    if !staff && material.status != MaterialStatus::Published {
        return Err(not_found(id));
    }
    Ok(Json(DataResponse { data: material }))
}

// ---------------------------------------------------------------------------
// POST / PUT / DELETE
// ---------------------------------------------------------------------------

/// POST /reading-materials
pub async fn create_material(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<SaveReadingMaterial>,
) -> AppResult<impl IntoResponse> {
    let material_type = validate_save(&input)?;
    let status = authored_status(input.status.as_deref())?.unwrap_or(MaterialStatus::Published);

    let created =
        ReadingMaterialRepo::create(&state.pool, staff.user_id, &input, material_type, status)
            .await?;

    tracing::info!(
        material_id = created.id,
        user_id = staff.user_id,
        material_type = %material_type,
        "Reading material created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /reading-materials/{id}
///
/// A `status` of `draft` or `published` is applied as well. Asking for a
/// status on an archived material is a 409 and writes nothing.
pub async fn update_material(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SaveReadingMaterial>,
) -> AppResult<impl IntoResponse> {
    let material_type = validate_save(&input)?;
    let status = authored_status(input.status.as_deref())?;

    let Some(updated) =
        ReadingMaterialRepo::update(&state.pool, id, &input, material_type, status).await?
    else {
        return match ReadingMaterialRepo::find_by_id(&state.pool, id).await? {
            Some(_) => Err(AppError::Core(CoreError::Conflict(
                "Restore the reading material before changing its status".into(),
            ))),
            None => Err(not_found(id)),
        };
    };

    tracing::info!(material_id = id, user_id = staff.user_id, "Reading material updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /reading-materials/{id}
pub async fn delete_material(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ReadingMaterialRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(material_id = id, user_id = admin.user_id, "Reading material deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Archive / restore
// ---------------------------------------------------------------------------

/// POST /reading-materials/{id}/archive
///
/// The body is optional; `{reason}` is recorded in the archive log.
pub async fn archive_material(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    input: Option<Json<ArchiveReadingMaterial>>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = input.unwrap_or_default();
    let reason = non_blank(input.reason.as_deref());
    optional_short_text("reason", reason)?;

    let current = ReadingMaterialRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let previous = validate_archive(current.status)?;

    // A concurrent archive wins the row lock; the loser sees `None` here.
    let archived = ReadingMaterialRepo::archive(&state.pool, id, previous, reason, staff.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Reading material is already archived".into(),
            ))
        })?;

    tracing::info!(
        material_id = id,
        user_id = staff.user_id,
        previous_status = %previous,
        "Reading material archived",
    );

    Ok(Json(DataResponse { data: archived }))
}

/// POST /reading-materials/{id}/restore
pub async fn restore_material(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let current = ReadingMaterialRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let open_entry = ReadingMaterialRepo::find_open_archive_entry(&state.pool, id).await?;
    let target = restore_target(current.status, open_entry.map(|e| e.previous_status))?;

    let restored = ReadingMaterialRepo::restore(&state.pool, id, target, staff.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict("Reading material is not archived".into()))
        })?;

    tracing::info!(
        material_id = id,
        user_id = staff.user_id,
        status = %target,
        "Reading material restored",
    );

    Ok(Json(DataResponse { data: restored }))
}

/// GET /reading-materials/archive-history?material_id=
pub async fn archive_history(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<ArchiveHistoryParams>,
) -> AppResult<impl IntoResponse> {
    ReadingMaterialRepo::find_by_id(&state.pool, params.material_id)
        .await?
        .ok_or_else(|| not_found(params.material_id))?;
    let history = ReadingMaterialRepo::archive_history(&state.pool, params.material_id).await?;
    Ok(Json(DataResponse { data: history }))
}

// ---------------------------------------------------------------------------
// Bulk operations
// ---------------------------------------------------------------------------

/// POST /reading-materials/bulk-archive
///
/// All-or-nothing: one unknown or already archived id aborts the batch.
pub async fn bulk_archive(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<BulkMaterialIds>,
) -> AppResult<impl IntoResponse> {
    let ids = dedup_ids(input.ids)?;
    let reason = non_blank(input.reason.as_deref());
    optional_short_text("reason", reason)?;

    let outcome =
        ReadingMaterialRepo::bulk_archive(&state.pool, &ids, reason, staff.user_id).await?;
    let archived = bulk_result(outcome)?;

    tracing::info!(
        user_id = staff.user_id,
        count = archived.len(),
        "Reading materials archived in bulk",
    );

    Ok(Json(DataResponse { data: archived }))
}

/// POST /reading-materials/bulk-publish
///
/// Archived materials in the batch are restored straight to `published`.
pub async fn bulk_publish(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<BulkMaterialIds>,
) -> AppResult<impl IntoResponse> {
    let ids = dedup_ids(input.ids)?;

    let outcome = ReadingMaterialRepo::bulk_publish(&state.pool, &ids, staff.user_id).await?;
    let published = bulk_result(outcome)?;

    tracing::info!(
        user_id = staff.user_id,
        count = published.len(),
        "Reading materials published in bulk",
    );

    Ok(Json(DataResponse { data: published }))
}
