//! Repository for the `incidents` and `incident_assignments` tables.

use cityvetcare_core::status::{IncidentStatus, IncidentType, Priority};
use cityvetcare_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::incident::{CreateIncident, Incident, IncidentFilter, UpdateIncident};
use crate::models::StatusCount;

/// Column list for `incidents` queries, including assigned team ids.
const COLUMNS: &str = "\
    id, reporter_user_id, reporter_name, reporter_contact, incident_type, \
    description, latitude, longitude, address, animal_species, animal_count, \
    animal_description, incident_date, images, status, priority, status_remarks, \
    ARRAY(SELECT a.catcher_team_id FROM incident_assignments a \
          WHERE a.incident_id = incidents.id ORDER BY a.catcher_team_id) AS assigned_team_ids, \
    created_at, updated_at";

/// Provides CRUD and workflow operations for incident reports.
pub struct IncidentRepo;

impl IncidentRepo {
    /// Insert a new report with `status = pending`.
    pub async fn create(
        pool: &PgPool,
        reporter_user_id: Option<DbId>,
        input: &CreateIncident,
        incident_type: IncidentType,
        priority: Priority,
    ) -> Result<Incident, sqlx::Error> {
        let query = format!(
            "INSERT INTO incidents \
                (reporter_user_id, reporter_name, reporter_contact, incident_type, \
                 description, latitude, longitude, address, animal_species, \
                 animal_count, animal_description, incident_date, images, status, priority) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, \
                     COALESCE($12, NOW()), $13, $14, $15) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Incident>(&query)
            .bind(reporter_user_id)
            .bind(&input.reporter_name)
            .bind(&input.reporter_contact)
            .bind(incident_type.as_str())
            .bind(input.description.trim())
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.address.trim())
            .bind(&input.animal_species)
            .bind(input.animal_count)
            .bind(&input.animal_description)
            .bind(input.incident_date)
            .bind(Json(&input.images))
            .bind(IncidentStatus::Pending.as_str())
            .bind(priority.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Incident>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM incidents WHERE id = $1");
        sqlx::query_as::<_, Incident>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List reports matching `filter`, newest first.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &IncidentFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Incident>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if filter.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if filter.priority.is_some() {
            conditions.push(format!("priority = ${param_idx}"));
            param_idx += 1;
        }
        if filter.incident_type.is_some() {
            conditions.push(format!("incident_type = ${param_idx}"));
            param_idx += 1;
        }
        if filter.reporter_user_id.is_some() {
            conditions.push(format!("reporter_user_id = ${param_idx}"));
            param_idx += 1;
        }
        if filter.search.is_some() {
            conditions.push(format!(
                "(description ILIKE ${param_idx} OR address ILIKE ${param_idx} \
                  OR reporter_name ILIKE ${param_idx} OR animal_species ILIKE ${param_idx})"
            ));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM incidents {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Incident>(&query);
        if let Some(s) = filter.status {
            q = q.bind(s.as_str());
        }
        if let Some(p) = filter.priority {
            q = q.bind(p.as_str());
        }
        if let Some(t) = filter.incident_type {
            q = q.bind(t.as_str());
        }
        if let Some(uid) = filter.reporter_user_id {
            q = q.bind(uid);
        }
        if let Some(ref pattern) = filter.search {
            q = q.bind(pattern);
        }
        q = q.bind(limit).bind(offset);

        q.fetch_all(pool).await
    }

    /// Replace the descriptive fields of a report.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateIncident,
        incident_type: IncidentType,
    ) -> Result<Option<Incident>, sqlx::Error> {
        let query = format!(
            "UPDATE incidents SET \
                incident_type = $2, description = $3, latitude = $4, longitude = $5, \
                address = $6, animal_species = $7, animal_count = $8, \
                animal_description = $9, images = $10 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Incident>(&query)
            .bind(id)
            .bind(incident_type.as_str())
            .bind(input.description.trim())
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.address.trim())
            .bind(&input.animal_species)
            .bind(input.animal_count)
            .bind(&input.animal_description)
            .bind(Json(&input.images))
            .fetch_optional(pool)
            .await
    }

    /// Set the status of a report. The remarks always belong to the new
    /// status, so `None` clears any earlier ones.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: IncidentStatus,
        remarks: Option<&str>,
    ) -> Result<Option<Incident>, sqlx::Error> {
        let query = format!(
            "UPDATE incidents SET status = $2, status_remarks = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Incident>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(remarks)
            .fetch_optional(pool)
            .await
    }

    pub async fn update_priority(
        pool: &PgPool,
        id: DbId,
        priority: Priority,
    ) -> Result<Option<Incident>, sqlx::Error> {
        let query =
            format!("UPDATE incidents SET priority = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Incident>(&query)
            .bind(id)
            .bind(priority.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Replace the set of catcher teams assigned to a report.
    ///
    /// Runs in one transaction. When `next_status` is given the report's
    /// status is updated in the same transaction.
    pub async fn assign_teams(
        pool: &PgPool,
        id: DbId,
        team_ids: &[DbId],
        assigned_by: DbId,
        next_status: Option<IncidentStatus>,
    ) -> Result<Option<Incident>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM incidents WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(None);
        }

        sqlx::query("DELETE FROM incident_assignments WHERE incident_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO incident_assignments (incident_id, catcher_team_id, assigned_by) \
             SELECT $1, team_id, $3 FROM UNNEST($2::BIGINT[]) AS team_id",
        )
        .bind(id)
        .bind(team_ids)
        .bind(assigned_by)
        .execute(&mut *tx)
        .await?;

        if let Some(status) = next_status {
            sqlx::query("UPDATE incidents SET status = $2 WHERE id = $1")
                .bind(id)
                .bind(status.as_str())
                .execute(&mut *tx)
                .await?;
        }

        let query = format!("SELECT {COLUMNS} FROM incidents WHERE id = $1");
        let incident = sqlx::query_as::<_, Incident>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(incident))
    }

    /// Hard-delete a report. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM incidents WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count reports per status.
    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM incidents GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }
}
