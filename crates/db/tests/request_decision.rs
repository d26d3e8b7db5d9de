//! Integration tests for adoption and redemption request workflows.

use cityvetcare_core::status::{AnimalStatus, RequestStatus};
use cityvetcare_db::models::request::{
    CreateAdoptionRequest, CreateRedemptionRequest, DecisionOutcome, RequestFilter,
};
use cityvetcare_db::models::stray_animal::{SaveStrayAnimal, StrayAnimal};
use cityvetcare_db::models::user::CreateUser;
use cityvetcare_db::repositories::{
    AdoptionRequestRepo, RedemptionRequestRepo, StrayAnimalRepo, UserRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, username: &str, role: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@cityvet.test"),
            password_hash: "not-a-real-hash".to_string(),
            full_name: None,
            contact_number: None,
            role: role.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn new_animal(pool: &PgPool, tag: &str) -> StrayAnimal {
    let input = SaveStrayAnimal {
        tag_code: tag.to_string(),
        species: "dog".to_string(),
        breed: Some("Aspin".to_string()),
        sex: None,
        color: Some("brown".to_string()),
        markings: None,
        location_captured: Some("Barangay Lahug".to_string()),
        captured_at: None,
        images: vec![],
        notes: None,
    };
    StrayAnimalRepo::create(pool, &input, Some("male"))
        .await
        .unwrap()
}

fn adoption_for(animal_id: i64, name: &str) -> CreateAdoptionRequest {
    CreateAdoptionRequest {
        animal_id,
        applicant_name: name.to_string(),
        applicant_contact: "09171234567".to_string(),
        applicant_email: None,
        applicant_address: "Cebu City".to_string(),
        reason_for_adoption: Some("Family pet".to_string()),
        notes: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_approving_adoption_marks_animal_adopted(pool: PgPool) {
    let staff = new_user(&pool, "staff", "staff").await;
    let citizen = new_user(&pool, "juan", "citizen").await;
    let animal = new_animal(&pool, "CVC-001").await;
    let request = AdoptionRequestRepo::create(&pool, citizen, &adoption_for(animal.id, "Juan"))
        .await
        .unwrap();
    assert_eq!(request.status, RequestStatus::Pending);

    let outcome = AdoptionRequestRepo::decide(
        &pool,
        request.id,
        RequestStatus::Approved,
        None,
        Some("Home visit done"),
        staff,
    )
    .await
    .unwrap();
    let DecisionOutcome::Decided(decided) = outcome else {
        panic!("pending request should be decided");
    };
    assert_eq!(decided.status, RequestStatus::Approved);
    assert_eq!(decided.decided_by, Some(staff));
    assert_eq!(decided.notes.as_deref(), Some("Home visit done"));

    let animal = StrayAnimalRepo::find_by_id(&pool, animal.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(animal.status, AnimalStatus::Adopted);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_approving_redemption_marks_animal_redeemed(pool: PgPool) {
    let staff = new_user(&pool, "staff", "staff").await;
    let citizen = new_user(&pool, "owner", "citizen").await;
    let animal = new_animal(&pool, "CVC-002").await;
    let request = RedemptionRequestRepo::create(
        &pool,
        citizen,
        &CreateRedemptionRequest {
            animal_id: animal.id,
            applicant_name: "Owner".to_string(),
            applicant_contact: "09170000000".to_string(),
            applicant_email: None,
            applicant_address: "Mandaue".to_string(),
            proof_of_ownership: Some("Vaccination card".to_string()),
            notes: None,
        },
    )
    .await
    .unwrap();

    let outcome =
        RedemptionRequestRepo::decide(&pool, request.id, RequestStatus::Approved, None, None, staff)
            .await
            .unwrap();
    assert!(matches!(outcome, DecisionOutcome::Decided(_)));

    let animal = StrayAnimalRepo::find_by_id(&pool, animal.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(animal.status, AnimalStatus::Redeemed);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_decision_loses(pool: PgPool) {
    let staff = new_user(&pool, "staff", "staff").await;
    let citizen = new_user(&pool, "juan", "citizen").await;
    let animal = new_animal(&pool, "CVC-003").await;
    let request = AdoptionRequestRepo::create(&pool, citizen, &adoption_for(animal.id, "Juan"))
        .await
        .unwrap();

    AdoptionRequestRepo::decide(
        &pool,
        request.id,
        RequestStatus::Rejected,
        Some("Incomplete documents"),
        None,
        staff,
    )
    .await
    .unwrap();

    let outcome =
        AdoptionRequestRepo::decide(&pool, request.id, RequestStatus::Approved, None, None, staff)
            .await
            .unwrap();
    assert!(matches!(outcome, DecisionOutcome::NotPending));

    let stored = AdoptionRequestRepo::find_by_id(&pool, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, RequestStatus::Rejected);
    assert_eq!(stored.rejection_reason.as_deref(), Some("Incomplete documents"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_approval_rolls_back_when_animal_gone(pool: PgPool) {
    let staff = new_user(&pool, "staff", "staff").await;
    let citizen = new_user(&pool, "juan", "citizen").await;
    let animal = new_animal(&pool, "CVC-004").await;
    let first = AdoptionRequestRepo::create(&pool, citizen, &adoption_for(animal.id, "Juan"))
        .await
        .unwrap();
    let second = AdoptionRequestRepo::create(&pool, citizen, &adoption_for(animal.id, "Maria"))
        .await
        .unwrap();

    AdoptionRequestRepo::decide(&pool, first.id, RequestStatus::Approved, None, None, staff)
        .await
        .unwrap();
    let outcome =
        AdoptionRequestRepo::decide(&pool, second.id, RequestStatus::Approved, None, None, staff)
            .await
            .unwrap();
    assert!(matches!(outcome, DecisionOutcome::AnimalUnavailable));

    let stored = AdoptionRequestRepo::find_by_id(&pool, second.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, RequestStatus::Pending, "decision must roll back");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_archive_only_from_decided(pool: PgPool) {
    let staff = new_user(&pool, "staff", "staff").await;
    let citizen = new_user(&pool, "juan", "citizen").await;
    let animal = new_animal(&pool, "CVC-005").await;
    let request = AdoptionRequestRepo::create(&pool, citizen, &adoption_for(animal.id, "Juan"))
        .await
        .unwrap();

    let archived = AdoptionRequestRepo::archive(&pool, request.id).await.unwrap();
    assert!(archived.is_none(), "pending requests cannot be archived");

    AdoptionRequestRepo::decide(
        &pool,
        request.id,
        RequestStatus::Rejected,
        Some("No fence"),
        None,
        staff,
    )
    .await
    .unwrap();
    let archived = AdoptionRequestRepo::archive(&pool, request.id)
        .await
        .unwrap()
        .expect("rejected request should archive");
    assert_eq!(archived.status, RequestStatus::Archived);

    let listed = AdoptionRequestRepo::list_filtered(&pool, &RequestFilter::default(), 50, 0)
        .await
        .unwrap();
    assert!(listed.is_empty(), "archived requests are hidden by default");

    let filter = RequestFilter {
        include_archived: true,
        ..Default::default()
    };
    let listed = AdoptionRequestRepo::list_filtered(&pool, &filter, 50, 0)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_mine_filters_by_applicant(pool: PgPool) {
    let juan = new_user(&pool, "juan", "citizen").await;
    let maria = new_user(&pool, "maria", "citizen").await;
    let animal = new_animal(&pool, "CVC-006").await;
    AdoptionRequestRepo::create(&pool, juan, &adoption_for(animal.id, "Juan"))
        .await
        .unwrap();
    AdoptionRequestRepo::create(&pool, maria, &adoption_for(animal.id, "Maria"))
        .await
        .unwrap();

    let filter = RequestFilter {
        applicant_user_id: Some(juan),
        ..Default::default()
    };
    let mine = AdoptionRequestRepo::list_filtered(&pool, &filter, 50, 0)
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].applicant_name, "Juan");
}
