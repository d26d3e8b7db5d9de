//! HTTP-level tests for announcements and per-user read state.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_auth, post_json_auth, put_json_auth};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn publish(pool: &PgPool, token: &str, title: &str, extra: Value) -> i64 {
    let mut body = json!({
        "title": title,
        "body": "Free anti-rabies vaccination at the city hall grounds.",
        "category": "campaign",
        "priority": "High",
    });
    if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
        body.extend(extra.clone());
    }
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/announcements", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn unread(pool: &PgPool, token: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/announcements/unread-count", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]["unread_count"]
        .as_i64()
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_list_shows_published_only(pool: PgPool) {
    let (_s, staff) = common::user_with_token(&pool, "author", "staff").await;
    publish(&pool, &staff, "Vaccination drive", json!({})).await;
    publish(&pool, &staff, "Draft notice", json!({ "status": "draft" })).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/announcements").await).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], "Vaccination drive");
    assert_eq!(rows[0]["category"], "campaign");
    assert_eq!(rows[0]["priority"], "high");

    // Legacy capitalised filter is accepted.
    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/announcements?status=Published").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/announcements?status=all").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/announcements?status=all", &staff).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_read_decrements_once(pool: PgPool) {
    let (_s, staff) = common::user_with_token(&pool, "writer", "staff").await;
    let (_c, citizen) = common::user_with_token(&pool, "reader", "citizen").await;
    let first = publish(&pool, &staff, "First", json!({})).await;
    publish(&pool, &staff, "Second", json!({})).await;

    assert_eq!(unread(&pool, &citizen).await, 2);

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/announcements/{first}/read"), &citizen).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["changed"], 1);
    assert_eq!(json["data"]["unread_count"], 1);

    // Second call is a no-op.
    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/announcements/{first}/read"), &citizen).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["changed"], 0);
    assert_eq!(json["data"]["unread_count"], 1);

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, "/api/announcements/read-all", &citizen).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(unread(&pool, &citizen).await, 0);

    // Never below zero.
    let app = common::build_test_app(pool.clone());
    post_auth(app, "/api/announcements/read-all", &citizen).await;
    assert_eq!(unread(&pool, &citizen).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_feed_reports_read_state_and_hides(pool: PgPool) {
    let (_s, staff) = common::user_with_token(&pool, "feedstaff", "staff").await;
    let (_c, citizen) = common::user_with_token(&pool, "feedreader", "citizen").await;
    let keep = publish(&pool, &staff, "Keep", json!({})).await;
    let hide = publish(&pool, &staff, "Hide me", json!({})).await;

    let app = common::build_test_app(pool.clone());
    post_auth(app, &format!("/api/announcements/{keep}/read"), &citizen).await;
    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/announcements/{hide}/hide"), &citizen).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/announcements/feed", &citizen).await).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], keep);
    assert_eq!(rows[0]["is_read"], true);

    let app = common::build_test_app(pool.clone());
    post_auth(app, &format!("/api/announcements/{hide}/unhide"), &citizen).await;
    let app = common::build_test_app(pool);
    let json = body_json(
        get_auth(app, "/api/announcements/feed?unread_only=true", &citizen).await,
    )
    .await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], hide);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_citizen_cannot_author_and_drafts_are_hidden(pool: PgPool) {
    let (_s, staff) = common::user_with_token(&pool, "drafter", "staff").await;
    let (_c, citizen) = common::user_with_token(&pool, "nosy", "citizen").await;
    let draft = publish(&pool, &staff, "Secret draft", json!({ "status": "draft" })).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/announcements",
        json!({ "title": "Mine", "body": "Body" }),
        &citizen,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/announcements/{draft}"), &citizen).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = post_auth(app, &format!("/api/announcements/{draft}/read"), &citizen).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_editing_a_draft_keeps_it_unpublished(pool: PgPool) {
    let (_a, staff) = common::user_with_token(&pool, "comms", "staff").await;
    let (_c, citizen) = common::user_with_token(&pool, "maria", "citizen").await;
    let id = publish(&pool, &staff, "Clinic schedule", json!({ "status": "draft" })).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/announcements/{id}"),
        json!({
            "title": "Clinic schedule (revised)",
            "body": "Clinics open at 9 AM starting Monday.",
            "attachments": [],
        }),
        &staff,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "draft");
    assert_eq!(json["data"]["category"], "campaign");
    assert_eq!(json["data"]["priority"], "high");

    assert_eq!(unread(&pool, &citizen).await, 0);
    let app = common::build_test_app(pool.clone());
    let listed = body_json(get(app, "/api/announcements").await).await;
    assert!(listed["data"].as_array().unwrap().is_empty());
}
