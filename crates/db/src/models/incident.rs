//! Incident report entity model and DTOs.

use cityvetcare_core::status::{IncidentStatus, IncidentType, Priority};
use cityvetcare_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `incidents` table, with the ids of assigned catcher teams.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Incident {
    pub id: DbId,
    pub reporter_user_id: Option<DbId>,
    pub reporter_name: Option<String>,
    pub reporter_contact: Option<String>,
    #[sqlx(try_from = "String")]
    pub incident_type: IncidentType,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub animal_species: Option<String>,
    pub animal_count: Option<i32>,
    pub animal_description: Option<String>,
    pub incident_date: Timestamp,
    pub images: Json<Vec<String>>,
    #[sqlx(try_from = "String")]
    pub status: IncidentStatus,
    #[sqlx(try_from = "String")]
    pub priority: Priority,
    pub status_remarks: Option<String>,
    pub assigned_team_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for submitting a report. Enum fields are normalized by the handler.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIncident {
    pub incident_type: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub reporter_name: Option<String>,
    pub reporter_contact: Option<String>,
    pub animal_species: Option<String>,
    pub animal_count: Option<i32>,
    pub animal_description: Option<String>,
    pub incident_date: Option<Timestamp>,
    #[serde(default)]
    pub images: Vec<String>,
    pub priority: Option<String>,
}

/// DTO for editing the descriptive fields of a report.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateIncident {
    pub incident_type: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub animal_species: Option<String>,
    pub animal_count: Option<i32>,
    pub animal_description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// DTO for `PUT /incidents/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateIncidentStatus {
    pub status: String,
    pub remarks: Option<String>,
}

/// DTO for `PUT /incidents/{id}/priority`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateIncidentPriority {
    pub priority: String,
}

/// DTO for `PUT /incidents/{id}/assign`.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignCatchers {
    pub catcher_team_ids: Vec<DbId>,
}

/// Filters for incident listing, already normalized.
#[derive(Debug, Clone, Default)]
pub struct IncidentFilter {
    pub status: Option<IncidentStatus>,
    pub priority: Option<Priority>,
    pub incident_type: Option<IncidentType>,
    pub reporter_user_id: Option<DbId>,
    /// `ILIKE` pattern matched against description, address and reporter name.
    pub search: Option<String>,
}
