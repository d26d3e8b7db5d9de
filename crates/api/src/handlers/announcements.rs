//! Handlers for announcements and per-user read/hidden state.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use cityvetcare_core::announcement::{is_visible, validate_announcement};
use cityvetcare_core::error::CoreError;
use cityvetcare_core::status::{AnnouncementCategory, AnnouncementStatus, Priority, StatusFilter};
use cityvetcare_core::types::DbId;
use cityvetcare_core::validation::non_blank;
use cityvetcare_db::models::announcement::{
    AnnouncementScope, SaveAnnouncement, UpdateAnnouncementStatus,
};
use cityvetcare_db::repositories::announcement_repo::AnnouncementFields;
use cityvetcare_db::repositories::AnnouncementRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnnouncementListParams {
    pub status: Option<String>,
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct FeedParams {
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub unread_count: i64,
}

/// Result of a read-state change plus the caller's fresh unread count.
#[derive(Debug, Serialize)]
pub struct ReadStateChange {
    pub changed: u64,
    pub unread_count: i64,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Announcement",
        id,
    })
}

/// Validate a save request and normalize whichever enum fields it carries.
fn resolve_fields(input: &SaveAnnouncement) -> AppResult<AnnouncementFields> {
    validate_announcement(&input.title, &input.body, input.attachments.len())?;
    Ok(AnnouncementFields {
        category: non_blank(input.category.as_deref())
            .map(AnnouncementCategory::normalize)
            .transpose()?,
        priority: non_blank(input.priority.as_deref())
            .map(Priority::normalize)
            .transpose()?,
        status: non_blank(input.status.as_deref())
            .map(AnnouncementStatus::normalize)
            .transpose()?,
    })
}

/// Visible announcements must exist for the user-state endpoints.
async fn require_visible(state: &AppState, id: DbId) -> AppResult<()> {
    let announcement = AnnouncementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if !is_visible(announcement.status, announcement.publish_date, Utc::now()) {
        return Err(not_found(id));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// GET /announcements
///
/// Without a `status` filter only visible announcements are returned.
/// `status=all` or any non-published status requires staff.
pub async fn list_announcements(
    MaybeAuthUser(auth): MaybeAuthUser,
    State(state): State<AppState>,
    Query(params): Query<AnnouncementListParams>,
) -> AppResult<impl IntoResponse> {
    let scope = match StatusFilter::<AnnouncementStatus>::parse(params.status.as_deref())? {
        StatusFilter::Default | StatusFilter::Only(AnnouncementStatus::Published) => {
            AnnouncementScope::Visible
        }
        StatusFilter::All => AnnouncementScope::All,
        StatusFilter::Only(status) => AnnouncementScope::Status(status),
    };
    if scope != AnnouncementScope::Visible && !auth.as_ref().is_some_and(AuthUser::is_staff) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Staff or Admin role required to list unpublished announcements".into(),
        )));
    }
    let category = StatusFilter::<AnnouncementCategory>::parse(params.category.as_deref())?.only();
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();

    let announcements =
        AnnouncementRepo::list(&state.pool, scope, category, limit, offset).await?;
    Ok(Json(DataResponse {
        data: announcements,
    }))
}

/// GET /announcements/feed
pub async fn feed(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();
    let items = AnnouncementRepo::feed_for_user(
        &state.pool,
        auth.user_id,
        params.unread_only,
        limit,
        offset,
    )
    .await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /announcements/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let unread_count = AnnouncementRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: UnreadCount { unread_count },
    }))
}

/// GET /announcements/{id}
///
/// Drafts, archived and scheduled announcements are only visible to staff.
pub async fn get_announcement(
    MaybeAuthUser(auth): MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let announcement = AnnouncementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let staff = auth.as_ref().is_some_and(AuthUser::is_staff);
    if !staff && !is_visible(announcement.status, announcement.publish_date, Utc::now()) {
        return Err(not_found(id));
    }
    Ok(Json(DataResponse { data: announcement }))
}

// ---------------------------------------------------------------------------
// Authoring
// ---------------------------------------------------------------------------

/// POST /announcements
pub async fn create_announcement(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<SaveAnnouncement>,
) -> AppResult<impl IntoResponse> {
    let fields = resolve_fields(&input)?;
    let created = AnnouncementRepo::create(&state.pool, staff.user_id, &input, fields).await?;

    tracing::info!(
        announcement_id = created.id,
        user_id = staff.user_id,
        category = %created.category,
        "Announcement created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /announcements/{id}
///
/// Omitted category, priority or status keep their stored values.
pub async fn update_announcement(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SaveAnnouncement>,
) -> AppResult<impl IntoResponse> {
    let fields = resolve_fields(&input)?;
    let updated = AnnouncementRepo::update(&state.pool, id, &input, fields)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(announcement_id = id, user_id = staff.user_id, "Announcement updated");

    Ok(Json(DataResponse { data: updated }))
}

/// PUT /announcements/{id}/status
pub async fn update_announcement_status(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAnnouncementStatus>,
) -> AppResult<impl IntoResponse> {
    let status = AnnouncementStatus::normalize(&input.status)?;
    let updated = AnnouncementRepo::update_status(&state.pool, id, status)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        announcement_id = id,
        user_id = staff.user_id,
        status = %status,
        "Announcement status updated",
    );

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /announcements/{id}
pub async fn delete_announcement(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !AnnouncementRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(announcement_id = id, user_id = admin.user_id, "Announcement deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Per-user state
// ---------------------------------------------------------------------------

/// POST /announcements/{id}/read
///
/// Idempotent: only the first call for a user changes the unread count.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_visible(&state, id).await?;
    let newly_read = AnnouncementRepo::mark_read(&state.pool, id, auth.user_id).await?;
    let unread_count = AnnouncementRepo::unread_count(&state.pool, auth.user_id).await?;

    if newly_read {
        tracing::debug!(announcement_id = id, user_id = auth.user_id, "Announcement read");
    }

    Ok(Json(DataResponse {
        data: ReadStateChange {
            changed: u64::from(newly_read),
            unread_count,
        },
    }))
}

/// POST /announcements/read-all
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let changed = AnnouncementRepo::mark_all_read(&state.pool, auth.user_id).await?;
    let unread_count = AnnouncementRepo::unread_count(&state.pool, auth.user_id).await?;

    tracing::info!(user_id = auth.user_id, changed, "All announcements marked read");

    Ok(Json(DataResponse {
        data: ReadStateChange {
            changed,
            unread_count,
        },
    }))
}

/// POST /announcements/{id}/hide
pub async fn hide(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_visible(&state, id).await?;
    AnnouncementRepo::set_hidden(&state.pool, id, auth.user_id, true).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /announcements/{id}/unhide
pub async fn unhide(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_visible(&state, id).await?;
    AnnouncementRepo::set_hidden(&state.pool, id, auth.user_id, false).await?;
    Ok(StatusCode::NO_CONTENT)
}
