//! Veterinary clinic entity model and DTOs.

use cityvetcare_core::status::ClinicStatus;
use cityvetcare_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `clinics` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Clinic {
    pub id: DbId,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ClinicStatus,
    pub services: Json<Vec<String>>,
    pub operating_hours: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A clinic with its distance from the caller's position.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyClinic {
    #[serde(flatten)]
    pub clinic: Clinic,
    pub distance_km: f64,
}

/// DTO for creating or replacing a clinic.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveClinic {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
    pub operating_hours: Option<String>,
}
