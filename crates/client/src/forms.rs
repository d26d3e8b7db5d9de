//! Request bodies with their client-side gates.
//!
//! Every form derives [`Validate`]; [`ApiClient`](crate::client::ApiClient)
//! runs `validate()` before sending so obviously incomplete input never
//! leaves the device. The server repeats every check.

use std::borrow::Cow;

use cityvetcare_core::decision::{self, Decision};
use cityvetcare_core::incident::{validate_report, validate_status_change, ReportFields};
use cityvetcare_core::reading_material::validate_bulk_ids;
use cityvetcare_core::status::{
    AnnouncementCategory, AnnouncementStatus, CatcherTeamStatus, ClinicStatus, IncidentStatus,
    IncidentType, MaterialStatus, MaterialType, Priority,
};
use cityvetcare_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use validator::{Validate, ValidationError};

use crate::error::ClientError;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::Borrowed("must not be blank"));
        return Err(err);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginForm {
    #[validate(custom(function = "not_blank"))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterForm {
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(max = 255))]
    pub full_name: Option<String>,
    #[validate(length(max = 255))]
    pub contact_number: Option<String>,
}

// ---------------------------------------------------------------------------
// Incidents
// ---------------------------------------------------------------------------

/// A citizen's incident report.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct IncidentReportForm {
    pub incident_type: IncidentType,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub address: String,
    #[validate(length(max = 255))]
    pub reporter_name: Option<String>,
    #[validate(length(max = 255))]
    pub reporter_contact: Option<String>,
    pub animal_species: Option<String>,
    #[validate(range(min = 1, max = 100))]
    pub animal_count: Option<i32>,
    pub animal_description: Option<String>,
    pub incident_date: Option<Timestamp>,
    #[validate(length(max = 10))]
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl IncidentReportForm {
    /// Full submission gate. Anonymous (emergency) reports must carry the
    /// reporter's name and contact number.
    pub fn check(&self, authenticated: bool) -> Result<(), ClientError> {
        self.validate()?;
        validate_report(&ReportFields {
            description: &self.description,
            address: &self.address,
            latitude: self.latitude,
            longitude: self.longitude,
            reporter_name: self.reporter_name.as_deref(),
            reporter_contact: self.reporter_contact.as_deref(),
            animal_count: self.animal_count,
            image_count: self.images.len(),
            authenticated,
        })
        .map_err(|e| ClientError::Validation(e.to_string()))
    }

    pub fn can_submit(&self, authenticated: bool) -> bool {
        self.check(authenticated).is_ok()
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
#[validate(schema(function = "remarks_for_rejection"))]
pub struct IncidentStatusForm {
    pub status: IncidentStatus,
    #[validate(length(max = 1000))]
    pub remarks: Option<String>,
}

fn remarks_for_rejection(form: &IncidentStatusForm) -> Result<(), ValidationError> {
    validate_status_change(form.status, form.remarks.as_deref()).map_err(|e| {
        let mut err = ValidationError::new("remarks");
        err.message = Some(Cow::Owned(e.to_string()));
        err
    })
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CatcherTeamForm {
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub team_name: String,
    pub leader_name: Option<String>,
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CatcherTeamStatus>,
}

// ---------------------------------------------------------------------------
// Announcements and reading materials
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Validate)]
pub struct AnnouncementForm {
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<AnnouncementCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AnnouncementStatus>,
    pub publish_date: Option<Timestamp>,
    pub attachments: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct ReadingMaterialForm {
    pub material_type: MaterialType,
    pub category: Option<String>,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub title: String,
    pub author: Option<String>,
    pub content: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    /// `archived` is only reachable through the archive action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MaterialStatus>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct BulkIdsForm {
    #[validate(custom(function = "within_bulk_limit"))]
    pub ids: Vec<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Same bounds the server applies to bulk archive and publish.
fn within_bulk_limit(ids: &[DbId]) -> Result<(), ValidationError> {
    validate_bulk_ids(ids).map_err(|e| {
        let mut err = ValidationError::new("ids");
        err.message = Some(Cow::Owned(e.to_string()));
        err
    })
}

// ---------------------------------------------------------------------------
// Stray animals and requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Validate)]
pub struct StrayAnimalForm {
    #[validate(custom(function = "not_blank"))]
    pub tag_code: String,
    #[validate(custom(function = "not_blank"))]
    pub species: String,
    pub breed: Option<String>,
    pub sex: Option<String>,
    pub color: Option<String>,
    pub markings: Option<String>,
    pub location_captured: Option<String>,
    pub captured_at: Option<Timestamp>,
    pub images: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct AdoptionRequestForm {
    pub animal_id: DbId,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub applicant_name: String,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub applicant_contact: String,
    #[validate(email)]
    pub applicant_email: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub applicant_address: String,
    pub reason_for_adoption: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct RedemptionRequestForm {
    pub animal_id: DbId,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub applicant_name: String,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub applicant_contact: String,
    #[validate(email)]
    pub applicant_email: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub applicant_address: String,
    pub proof_of_ownership: Option<String>,
    pub notes: Option<String>,
}

/// The approve / reject modal of a request.
#[derive(Debug, Clone, Serialize, Validate)]
#[validate(schema(function = "reason_for_decision"))]
pub struct DecisionForm {
    pub decision: Decision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn reason_for_decision(form: &DecisionForm) -> Result<(), ValidationError> {
    decision::validate_reason(form.decision, form.reason.as_deref()).map_err(|e| {
        let mut err = ValidationError::new("reason");
        err.message = Some(Cow::Owned(e.to_string()));
        err
    })?;
    Ok(())
}

impl DecisionForm {
    pub fn approve() -> Self {
        Self {
            decision: Decision::Approved,
            reason: None,
            notes: None,
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            decision: Decision::Rejected,
            reason: Some(reason.into()),
            notes: None,
        }
    }

    /// Whether the submit button is enabled. A rejection stays blocked
    /// until a non-blank reason is entered.
    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }
}

// ---------------------------------------------------------------------------
// Pets, vaccinations and clinics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Validate)]
pub struct PetOwnerForm {
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub full_name: String,
    pub contact_number: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct PetForm {
    pub owner_id: DbId,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub species: String,
    pub breed: Option<String>,
    pub sex: Option<String>,
    pub birth_date: Option<Date>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
#[validate(schema(function = "due_after_given"))]
pub struct VaccinationForm {
    pub pet_id: DbId,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub vaccine_name: String,
    pub lot_number: Option<String>,
    pub date_given: Date,
    pub next_due_date: Option<Date>,
    pub veterinarian: Option<String>,
    pub remarks: Option<String>,
}

fn due_after_given(form: &VaccinationForm) -> Result<(), ValidationError> {
    if form.next_due_date.is_some_and(|due| due <= form.date_given) {
        let mut err = ValidationError::new("next_due_date");
        err.message = Some(Cow::Borrowed("next_due_date must be after date_given"));
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct ClinicForm {
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub address: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    pub contact_number: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ClinicStatus>,
    pub services: Vec<String>,
    pub operating_hours: Option<String>,
}
