//! Incident report rules.

use crate::error::CoreError;
use crate::geo::validate_coordinates;
use crate::status::IncidentStatus;
use crate::validation::{
    optional_short_text, require_non_blank, require_short_text, validate_max_len, MAX_LONG_TEXT,
};

/// Maximum number of images attached to one report.
pub const MAX_IMAGES: usize = 10;

/// Maximum number of animals in one report.
pub const MAX_ANIMAL_COUNT: i32 = 100;

/// Borrowed view of the fields checked when a report is submitted.
#[derive(Debug, Clone, Copy)]
pub struct ReportFields<'a> {
    pub description: &'a str,
    pub address: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub reporter_name: Option<&'a str>,
    pub reporter_contact: Option<&'a str>,
    pub animal_count: Option<i32>,
    pub image_count: usize,
    /// Whether the submitter is signed in. Anonymous (emergency) reports
    /// must leave a name and contact number.
    pub authenticated: bool,
}

/// Validate a new or edited incident report.
pub fn validate_report(fields: &ReportFields<'_>) -> Result<(), CoreError> {
    require_non_blank("description", fields.description)?;
    validate_max_len("description", fields.description, MAX_LONG_TEXT)?;
    require_short_text("address", fields.address)?;
    validate_coordinates(fields.latitude, fields.longitude)?;

    if fields.authenticated {
        optional_short_text("reporter_name", fields.reporter_name)?;
        optional_short_text("reporter_contact", fields.reporter_contact)?;
    } else {
        require_short_text("reporter_name", fields.reporter_name.unwrap_or(""))?;
        require_short_text("reporter_contact", fields.reporter_contact.unwrap_or(""))?;
    }

    if let Some(count) = fields.animal_count {
        if !(1..=MAX_ANIMAL_COUNT).contains(&count) {
            return Err(CoreError::Validation(format!(
                "animal_count must be between 1 and {MAX_ANIMAL_COUNT}"
            )));
        }
    }
    if fields.image_count > MAX_IMAGES {
        return Err(CoreError::Validation(format!(
            "At most {MAX_IMAGES} images can be attached"
        )));
    }
    Ok(())
}

/// Status an incident moves to when catcher teams are assigned.
///
/// Reports still awaiting action are scheduled for patrol; reports already
/// being worked on keep their status.
pub fn status_after_assignment(current: IncidentStatus) -> Option<IncidentStatus> {
    match current {
        IncidentStatus::Pending | IncidentStatus::Approved => {
            Some(IncidentStatus::ScheduledForPatrol)
        }
        _ => None,
    }
}

/// Rejected reports must say why.
pub fn validate_status_change(
    next: IncidentStatus,
    remarks: Option<&str>,
) -> Result<(), CoreError> {
    if next == IncidentStatus::Rejected && remarks.map_or(true, |r| r.trim().is_empty()) {
        return Err(CoreError::Validation(
            "remarks are required when rejecting an incident report".into(),
        ));
    }
    Ok(())
}
