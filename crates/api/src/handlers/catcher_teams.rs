//! Handlers for animal catcher teams.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cityvetcare_core::error::CoreError;
use cityvetcare_core::status::{CatcherTeamStatus, StatusFilter};
use cityvetcare_core::types::DbId;
use cityvetcare_core::validation::{non_blank, optional_short_text, require_short_text};
use cityvetcare_db::models::catcher_team::SaveCatcherTeam;
use cityvetcare_db::repositories::CatcherTeamRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TeamListParams {
    pub status: Option<String>,
}

fn validate(input: &SaveCatcherTeam) -> AppResult<CatcherTeamStatus> {
    require_short_text("team_name", &input.team_name)?;
    optional_short_text("leader_name", input.leader_name.as_deref())?;
    optional_short_text("contact_number", input.contact_number.as_deref())?;
    Ok(non_blank(input.status.as_deref())
        .map(CatcherTeamStatus::normalize)
        .transpose()?
        .unwrap_or(CatcherTeamStatus::Active))
}

/// GET /catcher-teams
pub async fn list_teams(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<TeamListParams>,
) -> AppResult<impl IntoResponse> {
    let status = StatusFilter::<CatcherTeamStatus>::parse(params.status.as_deref())?.only();
    let teams = CatcherTeamRepo::list(&state.pool, status).await?;
    Ok(Json(DataResponse { data: teams }))
}

/// POST /catcher-teams
pub async fn create_team(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<SaveCatcherTeam>,
) -> AppResult<impl IntoResponse> {
    let status = validate(&input)?;
    let team = CatcherTeamRepo::create(&state.pool, &input, status).await?;
    tracing::info!(team_id = team.id, user_id = staff.user_id, "Catcher team created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: team })))
}

/// PUT /catcher-teams/{id}
pub async fn update_team(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SaveCatcherTeam>,
) -> AppResult<impl IntoResponse> {
    let status = validate(&input)?;
    let team = CatcherTeamRepo::update(&state.pool, id, &input, status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CatcherTeam",
            id,
        }))?;
    tracing::info!(team_id = id, user_id = staff.user_id, "Catcher team updated");
    Ok(Json(DataResponse { data: team }))
}
