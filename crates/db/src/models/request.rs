//! Adoption and redemption request models and DTOs.
//!
//! Both workflows share the `pending -> approved | rejected -> archived`
//! lifecycle; [`RequestRecord`] exposes the shared columns so the
//! repository and handlers can be written once.

use cityvetcare_core::decision::RequestKind;
use cityvetcare_core::status::RequestStatus;
use cityvetcare_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `adoption_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdoptionRequest {
    pub id: DbId,
    pub animal_id: DbId,
    pub applicant_user_id: Option<DbId>,
    pub applicant_name: String,
    pub applicant_contact: String,
    pub applicant_email: Option<String>,
    pub applicant_address: String,
    pub reason_for_adoption: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: RequestStatus,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub decided_by: Option<DbId>,
    pub decided_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `redemption_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RedemptionRequest {
    pub id: DbId,
    pub animal_id: DbId,
    pub applicant_user_id: Option<DbId>,
    pub applicant_name: String,
    pub applicant_contact: String,
    pub applicant_email: Option<String>,
    pub applicant_address: String,
    pub proof_of_ownership: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: RequestStatus,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub decided_by: Option<DbId>,
    pub decided_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Table metadata and shared accessors for request rows.
pub trait RequestRecord:
    for<'r> FromRow<'r, sqlx::postgres::PgRow> + Serialize + Send + Sync + Unpin + 'static
{
    const KIND: RequestKind;
    const TABLE: &'static str;
    const COLUMNS: &'static str;

    fn id(&self) -> DbId;
    fn animal_id(&self) -> DbId;
    fn applicant_user_id(&self) -> Option<DbId>;
    fn status(&self) -> RequestStatus;
    fn applicant_name(&self) -> &str;
}

impl RequestRecord for AdoptionRequest {
    const KIND: RequestKind = RequestKind::Adoption;
    const TABLE: &'static str = "adoption_requests";
    const COLUMNS: &'static str = "\
        id, animal_id, applicant_user_id, applicant_name, applicant_contact, \
        applicant_email, applicant_address, reason_for_adoption, status, notes, \
        rejection_reason, decided_by, decided_at, created_at, updated_at";

    fn id(&self) -> DbId {
        self.id
    }
    fn animal_id(&self) -> DbId {
        self.animal_id
    }
    fn applicant_user_id(&self) -> Option<DbId> {
        self.applicant_user_id
    }
    fn status(&self) -> RequestStatus {
        self.status
    }
    fn applicant_name(&self) -> &str {
        &self.applicant_name
    }
}

impl RequestRecord for RedemptionRequest {
    const KIND: RequestKind = RequestKind::Redemption;
    const TABLE: &'static str = "redemption_requests";
    const COLUMNS: &'static str = "\
        id, animal_id, applicant_user_id, applicant_name, applicant_contact, \
        applicant_email, applicant_address, proof_of_ownership, status, notes, \
        rejection_reason, decided_by, decided_at, created_at, updated_at";

    fn id(&self) -> DbId {
        self.id
    }
    fn animal_id(&self) -> DbId {
        self.animal_id
    }
    fn applicant_user_id(&self) -> Option<DbId> {
        self.applicant_user_id
    }
    fn status(&self) -> RequestStatus {
        self.status
    }
    fn applicant_name(&self) -> &str {
        &self.applicant_name
    }
}

/// DTO for `POST /adoption-requests`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdoptionRequest {
    pub animal_id: DbId,
    pub applicant_name: String,
    pub applicant_contact: String,
    pub applicant_email: Option<String>,
    pub applicant_address: String,
    pub reason_for_adoption: Option<String>,
    pub notes: Option<String>,
}

/// DTO for `POST /redemption-requests`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRedemptionRequest {
    pub animal_id: DbId,
    pub applicant_name: String,
    pub applicant_contact: String,
    pub applicant_email: Option<String>,
    pub applicant_address: String,
    pub proof_of_ownership: Option<String>,
    pub notes: Option<String>,
}

/// DTO for the decision endpoints.
///
/// `decision` accepts `approved` / `rejected`; `status` is accepted as an
/// alias for older clients that post `{ "status": "rejected" }`.
#[derive(Debug, Clone, Deserialize)]
pub struct DecideRequest {
    pub decision: Option<String>,
    pub status: Option<String>,
    pub reason: Option<String>,
    pub notes: Option<String>,
}

/// Filters for request listing, already normalized.
#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    /// `None` means every status except `archived`.
    pub status: Option<RequestStatus>,
    pub include_archived: bool,
    pub applicant_user_id: Option<DbId>,
    pub animal_id: Option<DbId>,
    /// `ILIKE` pattern matched against applicant name and contact.
    pub search: Option<String>,
}

/// Result of a decision write.
#[derive(Debug, Clone)]
pub enum DecisionOutcome<T> {
    /// The request was pending and is now decided.
    Decided(T),
    /// The request was no longer pending when the write ran.
    NotPending,
    /// Approval needs the animal in custody, and it no longer is.
    AnimalUnavailable,
}
