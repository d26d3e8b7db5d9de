//! HTTP-level tests for the clinic directory and nearby lookup.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, post_json_auth};
use serde_json::json;
use sqlx::PgPool;

async fn add_clinic(pool: &PgPool, admin: &str, name: &str, lat: f64, lng: f64, status: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/clinics",
        json!({
            "name": name,
            "address": "Cebu City",
            "latitude": lat,
            "longitude": lng,
            "status": status,
            "services": ["vaccination", "consultation"],
        }),
        admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_defaults_to_active(pool: PgPool) {
    let (_a, admin) = common::user_with_token(&pool, "clinicadmin", "admin").await;
    add_clinic(&pool, &admin, "Open Clinic", 10.31, 123.89, "active").await;
    add_clinic(&pool, &admin, "Closed Clinic", 10.32, 123.90, "inactive").await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/clinics").await).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Open Clinic");

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/clinics?status=all").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/clinics?status=bogus").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_nearby_sorted_by_distance(pool: PgPool) {
    let (_a, admin) = common::user_with_token(&pool, "geoadmin", "admin").await;
    let far = add_clinic(&pool, &admin, "Far", 10.35, 123.92, "active").await;
    let near = add_clinic(&pool, &admin, "Near", 10.316, 123.886, "active").await;
    add_clinic(&pool, &admin, "Other island", 9.65, 123.85, "active").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/clinics/nearby?lat=10.3157&lng=123.8854&radius_km=10").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], near);
    assert_eq!(rows[1]["id"], far);
    assert!(rows[0]["distance_km"].as_f64().unwrap() < rows[1]["distance_km"].as_f64().unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_admin_manages_clinics(pool: PgPool) {
    let (_s, staff) = common::user_with_token(&pool, "clinicstaff", "staff").await;
    let (_a, admin) = common::user_with_token(&pool, "clinicboss", "admin").await;
    let id = add_clinic(&pool, &admin, "Temp", 10.3, 123.9, "pending").await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/clinics/{id}"), &staff).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &format!("/api/clinics/{id}"), &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
