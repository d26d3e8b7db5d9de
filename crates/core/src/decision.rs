//! Approve / reject / archive rules for adoption and redemption requests.
//!
//! Only `pending` requests can be decided. A rejection must carry a
//! non-blank reason. Archiving is allowed once a request has been decided.

use crate::error::CoreError;
use crate::status::{normalize_key, AnimalStatus, RequestStatus};

/// Maximum length of a rejection reason.
pub const MAX_REASON_LENGTH: usize = 1_000;

/// An admin decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    #[serde(alias = "approve")]
    Approved,
    #[serde(alias = "reject")]
    Rejected,
}

impl Decision {
    /// Parse a decision, accepting both verb and past-tense forms.
    pub fn normalize(raw: &str) -> Result<Self, CoreError> {
        match normalize_key(raw).as_str() {
            "approve" | "approved" => Ok(Decision::Approved),
            "reject" | "rejected" => Ok(Decision::Rejected),
            _ => Err(CoreError::Validation(format!(
                "Invalid decision '{raw}'. Must be one of: approved, rejected"
            ))),
        }
    }

    /// Request status written when this decision is applied.
    pub fn target_status(self) -> RequestStatus {
        match self {
            Decision::Approved => RequestStatus::Approved,
            Decision::Rejected => RequestStatus::Rejected,
        }
    }

    pub fn requires_reason(self) -> bool {
        self == Decision::Rejected
    }
}

/// Which workflow a request belongs to. Determines the animal's new
/// custody status on approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Adoption,
    Redemption,
}

impl RequestKind {
    pub fn entity_name(self) -> &'static str {
        match self {
            RequestKind::Adoption => "AdoptionRequest",
            RequestKind::Redemption => "RedemptionRequest",
        }
    }

    /// Custody status the animal moves to when a request is approved.
    pub fn approved_animal_status(self) -> AnimalStatus {
        match self {
            RequestKind::Adoption => AnimalStatus::Adopted,
            RequestKind::Redemption => AnimalStatus::Redeemed,
        }
    }
}

/// Check that `reason` satisfies the gate for `decision`.
///
/// Returns the trimmed reason (if any) to persist.
pub fn validate_reason(
    decision: Decision,
    reason: Option<&str>,
) -> Result<Option<String>, CoreError> {
    let trimmed = reason.map(str::trim).filter(|r| !r.is_empty());
    if decision.requires_reason() && trimmed.is_none() {
        return Err(CoreError::Validation(
            "A reason is required when rejecting a request".into(),
        ));
    }
    if let Some(r) = trimmed {
        if r.chars().count() > MAX_REASON_LENGTH {
            return Err(CoreError::Validation(format!(
                "Reason exceeds maximum length of {MAX_REASON_LENGTH} characters"
            )));
        }
    }
    Ok(trimmed.map(str::to_string))
}

/// Validate a decision against the request's current status.
///
/// Returns the status to write.
pub fn validate_decision(
    current: RequestStatus,
    decision: Decision,
    reason: Option<&str>,
) -> Result<RequestStatus, CoreError> {
    if current != RequestStatus::Pending {
        return Err(CoreError::Conflict(format!(
            "Only pending requests can be decided (current status: {current})"
        )));
    }
    validate_reason(decision, reason)?;
    Ok(decision.target_status())
}

/// Validate that a request may be archived.
pub fn validate_archive(current: RequestStatus) -> Result<(), CoreError> {
    match current {
        RequestStatus::Approved | RequestStatus::Rejected => Ok(()),
        RequestStatus::Pending => Err(CoreError::Validation(
            "Pending requests must be approved or rejected before archiving".into(),
        )),
        RequestStatus::Archived => Err(CoreError::Conflict("Request is already archived".into())),
    }
}

/// Whether the animal can receive a new request.
pub fn validate_animal_available(status: AnimalStatus) -> Result<(), CoreError> {
    if status != AnimalStatus::InCustody {
        return Err(CoreError::Conflict(format!(
            "Animal is not available (current status: {status})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn approve_pending_request() {
        let next = validate_decision(RequestStatus::Pending, Decision::Approved, None).unwrap();
        assert_eq!(next, RequestStatus::Approved);
    }

    #[test]
    fn reject_without_reason_is_blocked() {
        let err = validate_decision(RequestStatus::Pending, Decision::Rejected, None).unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
        let err =
            validate_decision(RequestStatus::Pending, Decision::Rejected, Some("   ")).unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn reject_with_reason_is_allowed() {
        let next = validate_decision(
            RequestStatus::Pending,
            Decision::Rejected,
            Some("Incomplete requirements"),
        )
        .unwrap();
        assert_eq!(next, RequestStatus::Rejected);
    }

    #[test]
    fn decided_requests_cannot_be_decided_again() {
        let err =
            validate_decision(RequestStatus::Approved, Decision::Rejected, Some("x")).unwrap_err();
        assert_matches!(err, CoreError::Conflict(_));
    }

    #[test]
    fn archive_rules() {
        assert!(validate_archive(RequestStatus::Approved).is_ok());
        assert!(validate_archive(RequestStatus::Rejected).is_ok());
        assert_matches!(
            validate_archive(RequestStatus::Pending),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_archive(RequestStatus::Archived),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn decision_accepts_verbs() {
        assert_eq!(Decision::normalize("Approve").unwrap(), Decision::Approved);
        assert_eq!(Decision::normalize("rejected").unwrap(), Decision::Rejected);
        assert!(Decision::normalize("maybe").is_err());
    }

    #[test]
    fn reason_is_trimmed() {
        let reason = validate_reason(Decision::Rejected, Some("  no fence  ")).unwrap();
        assert_eq!(reason.as_deref(), Some("no fence"));
    }

    #[test]
    fn approval_moves_animal() {
        assert_eq!(
            RequestKind::Adoption.approved_animal_status(),
            AnimalStatus::Adopted
        );
        assert_eq!(
            RequestKind::Redemption.approved_animal_status(),
            AnimalStatus::Redeemed
        );
    }
}
