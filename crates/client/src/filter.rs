//! In-memory status and search filtering for list screens.
//!
//! Mirrors the server's list semantics so a screen can refine an already
//! fetched page without another round trip.

use cityvetcare_core::search::matches_search;
use cityvetcare_core::status::{IncidentStatus, RequestStatus, StatusFilter};

use crate::models::{Incident, RequestSummary};

/// Incidents matching `status` and `search`, newest first.
///
/// The default filter keeps every status.
pub fn filter_incidents<'a>(
    incidents: &'a [Incident],
    status: StatusFilter<IncidentStatus>,
    search: &str,
) -> Vec<&'a Incident> {
    let mut matched: Vec<&Incident> = incidents
        .iter()
        .filter(|i| status.only().map_or(true, |s| i.status == s))
        .filter(|i| {
            matches_search(
                &[
                    Some(i.description.as_str()),
                    Some(i.address.as_str()),
                    i.reporter_name.as_deref(),
                    i.animal_species.as_deref(),
                ],
                search,
            )
        })
        .collect();
    matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matched
}

/// Requests matching `status` and `search`.
///
/// The default filter hides archived requests; `All` shows them.
pub fn filter_requests<'a, T: RequestSummary>(
    requests: &'a [T],
    status: StatusFilter<RequestStatus>,
    search: &str,
) -> Vec<&'a T> {
    requests
        .iter()
        .filter(|r| match status {
            StatusFilter::Default => r.status() != RequestStatus::Archived,
            StatusFilter::All => true,
            StatusFilter::Only(s) => r.status() == s,
        })
        .filter(|r| matches_search(&r.search_fields(), search))
        .collect()
}

#[cfg(test)]
mod tests {
    use cityvetcare_core::status::{IncidentType, Priority};
    use chrono::{Duration, Utc};

    use super::*;
    use crate::models::AdoptionRequest;

    fn incident(id: i64, status: IncidentStatus, address: &str, age_mins: i64) -> Incident {
        let created = Utc::now() - Duration::minutes(age_mins);
        Incident {
            id,
            reporter_user_id: Some(7),
            reporter_name: Some("Ana".into()),
            reporter_contact: None,
            incident_type: IncidentType::Stray,
            description: "Stray dog".into(),
            latitude: 10.3,
            longitude: 123.9,
            address: address.into(),
            animal_species: Some("dog".into()),
            animal_count: Some(1),
            animal_description: None,
            incident_date: created,
            images: vec![],
            status,
            priority: Priority::Medium,
            status_remarks: None,
            assigned_team_ids: vec![],
            created_at: created,
            updated_at: created,
        }
    }

    fn request(id: i64, name: &str, status: RequestStatus) -> AdoptionRequest {
        let now = Utc::now();
        AdoptionRequest {
            id,
            animal_id: 1,
            applicant_user_id: None,
            applicant_name: name.into(),
            applicant_contact: "0917".into(),
            applicant_email: None,
            applicant_address: "Mabolo".into(),
            reason_for_adoption: None,
            status,
            notes: None,
            rejection_reason: None,
            decided_by: None,
            decided_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn resolved_filter_returns_only_resolved() {
        let items = vec![
            incident(1, IncidentStatus::Pending, "Lahug", 30),
            incident(2, IncidentStatus::Resolved, "Mabolo", 20),
            incident(3, IncidentStatus::Resolved, "Talamban", 10),
        ];
        let filter = StatusFilter::parse(Some("Completed")).unwrap();
        let ids: Vec<i64> = filter_incidents(&items, filter, "").iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn search_narrows_incidents() {
        let items = vec![
            incident(1, IncidentStatus::Pending, "Lahug", 30),
            incident(2, IncidentStatus::Pending, "Mabolo", 20),
        ];
        let found = filter_incidents(&items, StatusFilter::Default, "mabolo");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
    }

    #[test]
    fn requests_hide_archived_by_default() {
        let items = vec![
            request(1, "Ana", RequestStatus::Pending),
            request(2, "Ben", RequestStatus::Archived),
            request(3, "Carla", RequestStatus::Rejected),
        ];
        assert_eq!(filter_requests(&items, StatusFilter::Default, "").len(), 2);
        assert_eq!(filter_requests(&items, StatusFilter::All, "").len(), 3);
        let archived = filter_requests(&items, StatusFilter::Only(RequestStatus::Archived), "");
        assert_eq!(archived[0].id, 2);
        assert_eq!(filter_requests(&items, StatusFilter::All, "carla")[0].id, 3);
    }
}
