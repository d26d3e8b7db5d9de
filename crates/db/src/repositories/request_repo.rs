//! Repositories for `adoption_requests` and `redemption_requests`.
//!
//! Reads, decisions and archiving are shared through [`RequestRepo`],
//! generic over the row type. Inserts differ per table.

use std::marker::PhantomData;

use cityvetcare_core::status::{AnimalStatus, RequestStatus};
use cityvetcare_core::types::DbId;
use sqlx::PgPool;

use crate::models::request::{
    AdoptionRequest, CreateAdoptionRequest, CreateRedemptionRequest, DecisionOutcome,
    RedemptionRequest, RequestFilter, RequestRecord,
};

/// Shared queries for any [`RequestRecord`] table.
pub struct RequestRepo<T>(PhantomData<T>);

impl<T: RequestRecord> RequestRepo<T> {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<T>, sqlx::Error> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", T::COLUMNS, T::TABLE);
        sqlx::query_as::<_, T>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List requests with optional filters, newest first.
    ///
    /// Without an explicit status, archived requests are excluded unless
    /// `include_archived` is set.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &RequestFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<T>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: u32 = 1;

        if filter.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        } else if !filter.include_archived {
            conditions.push("status <> 'archived'".to_string());
        }
        if filter.applicant_user_id.is_some() {
            conditions.push(format!("applicant_user_id = ${param_idx}"));
            param_idx += 1;
        }
        if filter.animal_id.is_some() {
            conditions.push(format!("animal_id = ${param_idx}"));
            param_idx += 1;
        }
        if filter.search.is_some() {
            conditions.push(format!(
                "(applicant_name ILIKE ${param_idx} OR applicant_contact ILIKE ${param_idx})"
            ));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {} FROM {} {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${} OFFSET ${}",
            T::COLUMNS,
            T::TABLE,
            param_idx,
            param_idx + 1,
        );

        let mut q = sqlx::query_as::<_, T>(&query);
        if let Some(status) = filter.status {
            q = q.bind(status.as_str());
        }
        if let Some(user_id) = filter.applicant_user_id {
            q = q.bind(user_id);
        }
        if let Some(animal_id) = filter.animal_id {
            q = q.bind(animal_id);
        }
        if let Some(ref pattern) = filter.search {
            q = q.bind(pattern);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Decide a pending request.
    ///
    /// On approval the animal moves to `approved_animal_status` in the same
    /// transaction; if it is no longer in custody nothing is written.
    pub async fn decide(
        pool: &PgPool,
        id: DbId,
        status: RequestStatus,
        rejection_reason: Option<&str>,
        notes: Option<&str>,
        decided_by: DbId,
    ) -> Result<DecisionOutcome<T>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE {} SET \
                status = $2, rejection_reason = $3, notes = COALESCE($4, notes), \
                decided_by = $5, decided_at = NOW() \
             WHERE id = $1 AND status = 'pending' \
             RETURNING {}",
            T::TABLE,
            T::COLUMNS,
        );
        let Some(request) = sqlx::query_as::<_, T>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(rejection_reason)
            .bind(notes)
            .bind(decided_by)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(DecisionOutcome::NotPending);
        };

        if status == RequestStatus::Approved {
            let result = sqlx::query(
                "UPDATE stray_animals SET status = $2 WHERE id = $1 AND status = $3",
            )
            .bind(request.animal_id())
            .bind(T::KIND.approved_animal_status().as_str())
            .bind(AnimalStatus::InCustody.as_str())
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                return Ok(DecisionOutcome::AnimalUnavailable);
            }
        }

        tx.commit().await?;
        Ok(DecisionOutcome::Decided(request))
    }

    /// Move a decided request to `archived`.
    ///
    /// Returns `None` if the request is not currently approved or rejected.
    pub async fn archive(pool: &PgPool, id: DbId) -> Result<Option<T>, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET status = 'archived' \
             WHERE id = $1 AND status IN ('approved', 'rejected') \
             RETURNING {}",
            T::TABLE,
            T::COLUMNS,
        );
        sqlx::query_as::<_, T>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

pub type AdoptionRequestRepo = RequestRepo<AdoptionRequest>;
pub type RedemptionRequestRepo = RequestRepo<RedemptionRequest>;

impl RequestRepo<AdoptionRequest> {
    pub async fn create(
        pool: &PgPool,
        applicant_user_id: DbId,
        input: &CreateAdoptionRequest,
    ) -> Result<AdoptionRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO adoption_requests \
                (animal_id, applicant_user_id, applicant_name, applicant_contact, \
                 applicant_email, applicant_address, reason_for_adoption, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {}",
            AdoptionRequest::COLUMNS,
        );
        sqlx::query_as::<_, AdoptionRequest>(&query)
            .bind(input.animal_id)
            .bind(applicant_user_id)
            .bind(input.applicant_name.trim())
            .bind(input.applicant_contact.trim())
            .bind(&input.applicant_email)
            .bind(input.applicant_address.trim())
            .bind(&input.reason_for_adoption)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }
}

impl RequestRepo<RedemptionRequest> {
    pub async fn create(
        pool: &PgPool,
        applicant_user_id: DbId,
        input: &CreateRedemptionRequest,
    ) -> Result<RedemptionRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO redemption_requests \
                (animal_id, applicant_user_id, applicant_name, applicant_contact, \
                 applicant_email, applicant_address, proof_of_ownership, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {}",
            RedemptionRequest::COLUMNS,
        );
        sqlx::query_as::<_, RedemptionRequest>(&query)
            .bind(input.animal_id)
            .bind(applicant_user_id)
            .bind(input.applicant_name.trim())
            .bind(input.applicant_contact.trim())
            .bind(&input.applicant_email)
            .bind(input.applicant_address.trim())
            .bind(&input.proof_of_ownership)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }
}
