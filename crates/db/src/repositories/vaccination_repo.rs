//! Repository for the `vaccination_records` table.

use cityvetcare_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::vaccination::{SaveVaccinationRecord, VaccinationDue, VaccinationRecord};

/// Column list for `vaccination_records` queries.
const COLUMNS: &str = "\
    id, pet_id, vaccine_name, lot_number, date_given, next_due_date, \
    veterinarian, remarks, recorded_by, created_at, updated_at";

pub struct VaccinationRepo;

impl VaccinationRepo {
    pub async fn create(
        pool: &PgPool,
        recorded_by: DbId,
        input: &SaveVaccinationRecord,
    ) -> Result<VaccinationRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO vaccination_records \
                (pet_id, vaccine_name, lot_number, date_given, next_due_date, \
                 veterinarian, remarks, recorded_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VaccinationRecord>(&query)
            .bind(input.pet_id)
            .bind(input.vaccine_name.trim())
            .bind(&input.lot_number)
            .bind(input.date_given)
            .bind(input.next_due_date)
            .bind(&input.veterinarian)
            .bind(&input.remarks)
            .bind(recorded_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<VaccinationRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vaccination_records WHERE id = $1");
        sqlx::query_as::<_, VaccinationRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Records for one pet, most recent dose first.
    pub async fn list_for_pet(
        pool: &PgPool,
        pet_id: DbId,
    ) -> Result<Vec<VaccinationRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vaccination_records \
             WHERE pet_id = $1 \
             ORDER BY date_given DESC, id DESC"
        );
        sqlx::query_as::<_, VaccinationRecord>(&query)
            .bind(pet_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SaveVaccinationRecord,
    ) -> Result<Option<VaccinationRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE vaccination_records SET \
                pet_id = $2, vaccine_name = $3, lot_number = $4, date_given = $5, \
                next_due_date = $6, veterinarian = $7, remarks = $8 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VaccinationRecord>(&query)
            .bind(id)
            .bind(input.pet_id)
            .bind(input.vaccine_name.trim())
            .bind(&input.lot_number)
            .bind(input.date_given)
            .bind(input.next_due_date)
            .bind(&input.veterinarian)
            .bind(&input.remarks)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vaccination_records WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Doses whose next due date is on or before `until`, soonest first.
    /// Overdue doses are included.
    pub async fn list_due(pool: &PgPool, until: Date) -> Result<Vec<VaccinationDue>, sqlx::Error> {
        sqlx::query_as::<_, VaccinationDue>(
            "SELECT v.id AS record_id, v.pet_id, p.name AS pet_name, \
                    o.full_name AS owner_name, o.contact_number AS owner_contact, \
                    v.vaccine_name, v.next_due_date \
             FROM vaccination_records v \
             JOIN pets p ON p.id = v.pet_id \
             JOIN pet_owners o ON o.id = p.owner_id \
             WHERE v.next_due_date IS NOT NULL AND v.next_due_date <= $1 \
             ORDER BY v.next_due_date ASC, v.id ASC",
        )
        .bind(until)
        .fetch_all(pool)
        .await
    }
}
