//! Repository for the `clinics` table.

use cityvetcare_core::status::ClinicStatus;
use cityvetcare_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::clinic::{Clinic, SaveClinic};

/// Column list for `clinics` queries.
const COLUMNS: &str = "\
    id, name, address, latitude, longitude, contact_number, email, status, \
    services, operating_hours, created_at, updated_at";

pub struct ClinicRepo;

impl ClinicRepo {
    pub async fn create(
        pool: &PgPool,
        input: &SaveClinic,
        status: ClinicStatus,
    ) -> Result<Clinic, sqlx::Error> {
        let query = format!(
            "INSERT INTO clinics \
                (name, address, latitude, longitude, contact_number, email, status, \
                 services, operating_hours) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Clinic>(&query)
            .bind(input.name.trim())
            .bind(input.address.trim())
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.contact_number)
            .bind(&input.email)
            .bind(status.as_str())
            .bind(Json(&input.services))
            .bind(&input.operating_hours)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Clinic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clinics WHERE id = $1");
        sqlx::query_as::<_, Clinic>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List clinics alphabetically; `None` returns every status.
    pub async fn list(
        pool: &PgPool,
        status: Option<ClinicStatus>,
    ) -> Result<Vec<Clinic>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM clinics \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY name ASC, id ASC"
        );
        sqlx::query_as::<_, Clinic>(&query)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(pool)
            .await
    }

    /// Replace a clinic's fields. A missing status keeps the current one.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SaveClinic,
        status: Option<ClinicStatus>,
    ) -> Result<Option<Clinic>, sqlx::Error> {
        let query = format!(
            "UPDATE clinics SET \
                name = $2, address = $3, latitude = $4, longitude = $5, \
                contact_number = $6, email = $7, status = COALESCE($8, status), \
                services = $9, operating_hours = $10 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Clinic>(&query)
            .bind(id)
            .bind(input.name.trim())
            .bind(input.address.trim())
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.contact_number)
            .bind(&input.email)
            .bind(status.map(|s| s.as_str()))
            .bind(Json(&input.services))
            .bind(&input.operating_hours)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clinics WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
