//! Pet owner, pet and vaccination record models and DTOs.

use cityvetcare_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `pet_owners` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PetOwner {
    pub id: DbId,
    pub full_name: String,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePetOwner {
    pub full_name: String,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// A row from the `pets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pet {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub sex: Option<String>,
    pub birth_date: Option<Date>,
    pub color: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePet {
    pub owner_id: DbId,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub sex: Option<String>,
    pub birth_date: Option<Date>,
    pub color: Option<String>,
}

/// A row from the `vaccination_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VaccinationRecord {
    pub id: DbId,
    pub pet_id: DbId,
    pub vaccine_name: String,
    pub lot_number: Option<String>,
    pub date_given: Date,
    pub next_due_date: Option<Date>,
    pub veterinarian: Option<String>,
    pub remarks: Option<String>,
    pub recorded_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a vaccination record.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveVaccinationRecord {
    pub pet_id: DbId,
    pub vaccine_name: String,
    pub lot_number: Option<String>,
    pub date_given: Date,
    pub next_due_date: Option<Date>,
    pub veterinarian: Option<String>,
    pub remarks: Option<String>,
}

/// A vaccination falling due, joined with pet and owner names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VaccinationDue {
    pub record_id: DbId,
    pub pet_id: DbId,
    pub pet_name: String,
    pub owner_name: String,
    pub owner_contact: Option<String>,
    pub vaccine_name: String,
    pub next_due_date: Date,
}
