//! Repository for the `stray_animals` table.

use cityvetcare_core::status::AnimalStatus;
use cityvetcare_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::stray_animal::{SaveStrayAnimal, StrayAnimal};

/// Column list for `stray_animals` queries.
const COLUMNS: &str = "\
    id, tag_code, species, breed, sex, color, markings, location_captured, \
    captured_at, images, status, notes, created_at, updated_at";

pub struct StrayAnimalRepo;

impl StrayAnimalRepo {
    pub async fn create(
        pool: &PgPool,
        input: &SaveStrayAnimal,
        sex: Option<&str>,
    ) -> Result<StrayAnimal, sqlx::Error> {
        let query = format!(
            "INSERT INTO stray_animals \
                (tag_code, species, breed, sex, color, markings, location_captured, \
                 captured_at, images, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, NOW()), $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StrayAnimal>(&query)
            .bind(input.tag_code.trim())
            .bind(input.species.trim())
            .bind(&input.breed)
            .bind(sex)
            .bind(&input.color)
            .bind(&input.markings)
            .bind(&input.location_captured)
            .bind(input.captured_at)
            .bind(Json(&input.images))
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StrayAnimal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stray_animals WHERE id = $1");
        sqlx::query_as::<_, StrayAnimal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List animals, optionally restricted to one status. Newest captures first.
    pub async fn list(
        pool: &PgPool,
        status: Option<AnimalStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<StrayAnimal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stray_animals \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY captured_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, StrayAnimal>(&query)
            .bind(status.map(|s| s.as_str()))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SaveStrayAnimal,
        sex: Option<&str>,
    ) -> Result<Option<StrayAnimal>, sqlx::Error> {
        let query = format!(
            "UPDATE stray_animals SET \
                tag_code = $2, species = $3, breed = $4, sex = $5, color = $6, \
                markings = $7, location_captured = $8, \
                captured_at = COALESCE($9, captured_at), images = $10, notes = $11 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StrayAnimal>(&query)
            .bind(id)
            .bind(input.tag_code.trim())
            .bind(input.species.trim())
            .bind(&input.breed)
            .bind(sex)
            .bind(&input.color)
            .bind(&input.markings)
            .bind(&input.location_captured)
            .bind(input.captured_at)
            .bind(Json(&input.images))
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: AnimalStatus,
        notes: Option<&str>,
    ) -> Result<Option<StrayAnimal>, sqlx::Error> {
        let query = format!(
            "UPDATE stray_animals SET status = $2, notes = COALESCE($3, notes) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StrayAnimal>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(notes)
            .fetch_optional(pool)
            .await
    }
}
