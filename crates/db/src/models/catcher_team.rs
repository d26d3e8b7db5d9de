//! Catcher team entity model and DTOs.

use cityvetcare_core::status::CatcherTeamStatus;
use cityvetcare_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `catcher_teams` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CatcherTeam {
    pub id: DbId,
    pub team_name: String,
    pub leader_name: Option<String>,
    pub contact_number: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: CatcherTeamStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a catcher team.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveCatcherTeam {
    pub team_name: String,
    pub leader_name: Option<String>,
    pub contact_number: Option<String>,
    pub status: Option<String>,
}
