//! Response shapes returned by the backend.
//!
//! Status fields decode straight into the closed enums of
//! `cityvetcare_core::status`; the server only ever emits canonical values.

use cityvetcare_core::status::{
    AnimalStatus, AnnouncementCategory, AnnouncementStatus, CatcherTeamStatus, ClinicStatus,
    IncidentStatus, IncidentType, MaterialStatus, MaterialType, Priority, RequestStatus,
};
use cityvetcare_core::types::{Date, DbId, Timestamp};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
}

/// Body of a successful register or login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// The signed-in account as returned by `GET /auth/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub contact_number: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
    pub version: String,
    pub database: String,
}

// ---------------------------------------------------------------------------
// Incidents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Incident {
    pub id: DbId,
    pub reporter_user_id: Option<DbId>,
    pub reporter_name: Option<String>,
    pub reporter_contact: Option<String>,
    pub incident_type: IncidentType,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub animal_species: Option<String>,
    pub animal_count: Option<i32>,
    pub animal_description: Option<String>,
    pub incident_date: Timestamp,
    #[serde(default)]
    pub images: Vec<String>,
    pub status: IncidentStatus,
    pub priority: Priority,
    pub status_remarks: Option<String>,
    #[serde(default)]
    pub assigned_team_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncidentStats {
    pub total: i64,
    pub by_status: Vec<StatusCount>,
}

impl IncidentStats {
    /// Count for one status, zero when absent.
    pub fn count(&self, status: IncidentStatus) -> i64 {
        self.by_status
            .iter()
            .find(|c| c.status == status.as_str())
            .map_or(0, |c| c.count)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatcherTeam {
    pub id: DbId,
    pub team_name: String,
    pub leader_name: Option<String>,
    pub contact_number: Option<String>,
    pub status: CatcherTeamStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Announcements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Announcement {
    pub id: DbId,
    pub title: String,
    pub body: String,
    pub category: AnnouncementCategory,
    pub priority: Priority,
    pub status: AnnouncementStatus,
    pub publish_date: Timestamp,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An announcement in the signed-in user's feed.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedItem {
    #[serde(flatten)]
    pub announcement: Announcement,
    pub is_read: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UnreadCount {
    pub unread_count: i64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReadStateChange {
    pub changed: u64,
    pub unread_count: i64,
}

// ---------------------------------------------------------------------------
// Reading materials
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ReadingMaterial {
    pub id: DbId,
    pub material_type: MaterialType,
    pub category: Option<String>,
    pub title: String,
    pub author: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub status: MaterialStatus,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveLogEntry {
    pub id: DbId,
    pub material_id: DbId,
    pub previous_status: MaterialStatus,
    pub reason: Option<String>,
    pub archived_by: Option<DbId>,
    pub archived_at: Timestamp,
    pub restored_by: Option<DbId>,
    pub restored_at: Option<Timestamp>,
}

impl ArchiveLogEntry {
    pub fn is_open(&self) -> bool {
        self.restored_at.is_none()
    }
}

// ---------------------------------------------------------------------------
// Stray animals and requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
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
    #[serde(default)]
    pub images: Vec<String>,
    pub status: AnimalStatus,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdoptionRequest {
    pub id: DbId,
    pub animal_id: DbId,
    pub applicant_user_id: Option<DbId>,
    pub applicant_name: String,
    pub applicant_contact: String,
    pub applicant_email: Option<String>,
    pub applicant_address: String,
    pub reason_for_adoption: Option<String>,
    pub status: RequestStatus,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub decided_by: Option<DbId>,
    pub decided_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedemptionRequest {
    pub id: DbId,
    pub animal_id: DbId,
    pub applicant_user_id: Option<DbId>,
    pub applicant_name: String,
    pub applicant_contact: String,
    pub applicant_email: Option<String>,
    pub applicant_address: String,
    pub proof_of_ownership: Option<String>,
    pub status: RequestStatus,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub decided_by: Option<DbId>,
    pub decided_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields the list filters look at, shared by both request kinds.
pub trait RequestSummary {
    fn status(&self) -> RequestStatus;
    fn search_fields(&self) -> [Option<&str>; 3];
}

impl RequestSummary for AdoptionRequest {
    fn status(&self) -> RequestStatus {
        self.status
    }
    fn search_fields(&self) -> [Option<&str>; 3] {
        [
            Some(&self.applicant_name),
            Some(&self.applicant_contact),
            self.applicant_email.as_deref(),
        ]
    }
}

impl RequestSummary for RedemptionRequest {
    fn status(&self) -> RequestStatus {
        self.status
    }
    fn search_fields(&self) -> [Option<&str>; 3] {
        [
            Some(&self.applicant_name),
            Some(&self.applicant_contact),
            self.applicant_email.as_deref(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Pets and vaccinations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
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

#[derive(Debug, Clone, Deserialize)]
pub struct VaccinationDue {
    pub record_id: DbId,
    pub pet_id: DbId,
    pub pet_name: String,
    pub owner_name: String,
    pub owner_contact: Option<String>,
    pub vaccine_name: String,
    pub next_due_date: Date,
}

// ---------------------------------------------------------------------------
// Clinics and uploads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Clinic {
    pub id: DbId,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub status: ClinicStatus,
    #[serde(default)]
    pub services: Vec<String>,
    pub operating_hours: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NearbyClinic {
    #[serde(flatten)]
    pub clinic: Clinic,
    pub distance_km: f64,
}

/// Body of `POST /upload-images`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedImages {
    pub images: Vec<String>,
}
