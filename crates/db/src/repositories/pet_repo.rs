//! Repositories for the `pet_owners` and `pets` tables.

use cityvetcare_core::types::DbId;
use sqlx::PgPool;

use crate::models::vaccination::{CreatePet, CreatePetOwner, Pet, PetOwner};

const OWNER_COLUMNS: &str =
    "id, full_name, contact_number, email, address, created_at, updated_at";

const PET_COLUMNS: &str = "\
    id, owner_id, name, species, breed, sex, birth_date, color, created_at, updated_at";

pub struct PetOwnerRepo;

impl PetOwnerRepo {
    pub async fn create(pool: &PgPool, input: &CreatePetOwner) -> Result<PetOwner, sqlx::Error> {
        let query = format!(
            "INSERT INTO pet_owners (full_name, contact_number, email, address) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {OWNER_COLUMNS}"
        );
        sqlx::query_as::<_, PetOwner>(&query)
            .bind(input.full_name.trim())
            .bind(&input.contact_number)
            .bind(&input.email)
            .bind(&input.address)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PetOwner>, sqlx::Error> {
        let query = format!("SELECT {OWNER_COLUMNS} FROM pet_owners WHERE id = $1");
        sqlx::query_as::<_, PetOwner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List owners alphabetically. `search` is an `ILIKE` pattern over name
    /// and contact number.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PetOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {OWNER_COLUMNS} FROM pet_owners \
             WHERE ($1::TEXT IS NULL OR full_name ILIKE $1 OR contact_number ILIKE $1) \
             ORDER BY full_name ASC, id ASC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, PetOwner>(&query)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}

pub struct PetRepo;

impl PetRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreatePet,
        sex: Option<&str>,
    ) -> Result<Pet, sqlx::Error> {
        let query = format!(
            "INSERT INTO pets (owner_id, name, species, breed, sex, birth_date, color) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {PET_COLUMNS}"
        );
        sqlx::query_as::<_, Pet>(&query)
            .bind(input.owner_id)
            .bind(input.name.trim())
            .bind(input.species.trim())
            .bind(&input.breed)
            .bind(sex)
            .bind(input.birth_date)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Pet>, sqlx::Error> {
        let query = format!("SELECT {PET_COLUMNS} FROM pets WHERE id = $1");
        sqlx::query_as::<_, Pet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List pets, optionally for a single owner.
    pub async fn list(
        pool: &PgPool,
        owner_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Pet>, sqlx::Error> {
        let query = format!(
            "SELECT {PET_COLUMNS} FROM pets \
             WHERE ($1::BIGINT IS NULL OR owner_id = $1) \
             ORDER BY name ASC, id ASC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Pet>(&query)
            .bind(owner_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
