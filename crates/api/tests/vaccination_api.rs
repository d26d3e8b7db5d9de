//! HTTP-level tests for pet owners, pets and vaccination records.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn post(pool: &PgPool, uri: &str, body: Value, token: &str) -> (StatusCode, Value) {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, uri, body, token).await;
    let status = response.status();
    (status, body_json(response).await)
}

async fn registered_pet(pool: &PgPool, staff: &str) -> i64 {
    let (status, owner) = post(
        pool,
        "/api/pet-owners",
        json!({ "full_name": "Lorna Reyes", "contact_number": "09175550000" }),
        staff,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let owner_id = owner["data"]["id"].as_i64().unwrap();

    let (status, pet) = post(
        pool,
        "/api/pets",
        json!({ "owner_id": owner_id, "name": "Bantay", "species": "dog", "sex": "m" }),
        staff,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(pet["data"]["sex"], "male");
    pet["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_and_list_due(pool: PgPool) {
    let (_s, staff) = common::user_with_token(&pool, "vet", "staff").await;
    let pet_id = registered_pet(&pool, &staff).await;
    let today = Utc::now().date_naive();

    let (status, record) = post(
        &pool,
        "/api/vaccinations",
        json!({
            "pet_id": pet_id,
            "vaccine_name": "Anti-rabies",
            "date_given": (today - Duration::days(355)).to_string(),
            "next_due_date": (today + Duration::days(10)).to_string(),
            "veterinarian": "Dr. Tan",
        }),
        &staff,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let record_id = record["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let json = body_json(
        get_auth(app, &format!("/api/pets/{pet_id}/vaccinations"), &staff).await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/vaccinations/due", &staff).await).await;
    let due = json["data"].as_array().unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0]["pet_name"], "Bantay");
    assert_eq!(due[0]["owner_name"], "Lorna Reyes");

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/vaccinations/due?days=5", &staff).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/vaccinations/{record_id}"),
        json!({
            "pet_id": pet_id,
            "vaccine_name": "Anti-rabies",
            "date_given": (today - Duration::days(355)).to_string(),
            "next_due_date": (today + Duration::days(40)).to_string(),
        }),
        &staff,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/vaccinations/due", &staff).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &format!("/api/vaccinations/{record_id}"), &staff).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_due_date_must_follow_date_given(pool: PgPool) {
    let (_s, staff) = common::user_with_token(&pool, "strictvet", "staff").await;
    let pet_id = registered_pet(&pool, &staff).await;

    let (status, json) = post(
        &pool,
        "/api/vaccinations",
        json!({
            "pet_id": pet_id,
            "vaccine_name": "DHPP",
            "date_given": "2026-01-10",
            "next_due_date": "2026-01-01",
        }),
        &staff,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pet_requires_existing_owner(pool: PgPool) {
    let (_s, staff) = common::user_with_token(&pool, "ownerless", "staff").await;
    let (status, _) = post(
        &pool,
        "/api/pets",
        json!({ "owner_id": 424_242, "name": "Ghost", "species": "cat" }),
        &staff,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
