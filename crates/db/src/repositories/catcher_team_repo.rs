//! Repository for the `catcher_teams` table.

use cityvetcare_core::status::CatcherTeamStatus;
use cityvetcare_core::types::DbId;
use sqlx::PgPool;

use crate::models::catcher_team::{CatcherTeam, SaveCatcherTeam};

/// Column list for `catcher_teams` queries.
const COLUMNS: &str =
    "id, team_name, leader_name, contact_number, status, created_at, updated_at";

pub struct CatcherTeamRepo;

impl CatcherTeamRepo {
    pub async fn create(
        pool: &PgPool,
        input: &SaveCatcherTeam,
        status: CatcherTeamStatus,
    ) -> Result<CatcherTeam, sqlx::Error> {
        let query = format!(
            "INSERT INTO catcher_teams (team_name, leader_name, contact_number, status) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CatcherTeam>(&query)
            .bind(input.team_name.trim())
            .bind(&input.leader_name)
            .bind(&input.contact_number)
            .bind(status.as_str())
            .fetch_one(pool)
            .await
    }

    /// List teams, optionally restricted to one status, by name.
    pub async fn list(
        pool: &PgPool,
        status: Option<CatcherTeamStatus>,
    ) -> Result<Vec<CatcherTeam>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM catcher_teams \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY team_name"
        );
        sqlx::query_as::<_, CatcherTeam>(&query)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SaveCatcherTeam,
        status: CatcherTeamStatus,
    ) -> Result<Option<CatcherTeam>, sqlx::Error> {
        let query = format!(
            "UPDATE catcher_teams \
             SET team_name = $2, leader_name = $3, contact_number = $4, status = $5 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CatcherTeam>(&query)
            .bind(id)
            .bind(input.team_name.trim())
            .bind(&input.leader_name)
            .bind(&input.contact_number)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Return the subset of `ids` that refer to active teams.
    pub async fn active_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT id FROM catcher_teams WHERE id = ANY($1) AND status = 'active' ORDER BY id",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }
}
