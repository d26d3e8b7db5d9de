//! Impounded stray animal entity model and DTOs.

use cityvetcare_core::status::AnimalStatus;
use cityvetcare_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `stray_animals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StrayAnimal {
    pub id: DbId,
    pub tag_code: String,
    pub species: String,
    pub breed: Option<String>,
    pub sex: Option<String>,
    pub color: Option<String>,
    pub markings: Option<String>,
    pub location_captured: Option<String>,
    pub captured_at: Timestamp,
    pub images: Json<Vec<String>>,
    #[sqlx(try_from = "String")]
    pub status: AnimalStatus,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing an animal record.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveStrayAnimal {
    pub tag_code: String,
    pub species: String,
    pub breed: Option<String>,
    pub sex: Option<String>,
    pub color: Option<String>,
    pub markings: Option<String>,
    pub location_captured: Option<String>,
    pub captured_at: Option<Timestamp>,
    #[serde(default)]
    pub images: Vec<String>,
    pub notes: Option<String>,
}

/// DTO for `PUT /stray-animals/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAnimalStatus {
    pub status: String,
    pub notes: Option<String>,
}
