//! `ApiClient` against an in-process axum server.

use std::collections::HashMap;
use std::time::Duration;

use assert_matches::assert_matches;
use axum::extract::{Multipart, Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use cityvetcare_client::client::ImageFile;
use cityvetcare_client::forms::DecisionForm;
use cityvetcare_client::{ApiClient, ClientConfig, ClientError, Environment};
use cityvetcare_core::status::IncidentStatus;
use serde_json::{json, Value};

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_for(base_url: String) -> ApiClient {
    ApiClient::new(ClientConfig::new(&Environment::Deployed(base_url)))
}

fn incident_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "reporter_user_id": 7,
        "reporter_name": "Ana",
        "reporter_contact": "09171234567",
        "incident_type": "stray",
        "description": "Stray dog near the school",
        "latitude": 10.33,
        "longitude": 123.9,
        "address": "Lahug, Cebu City",
        "animal_species": "dog",
        "animal_count": 1,
        "animal_description": null,
        "incident_date": "2026-05-01T08:00:00Z",
        "images": [],
        "status": status,
        "priority": "medium",
        "status_remarks": null,
        "assigned_team_ids": [],
        "created_at": "2026-05-01T08:00:00Z",
        "updated_at": "2026-05-01T08:00:00Z"
    })
}

async fn unread_count(headers: HeaderMap) -> impl IntoResponse {
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some("Bearer good-token") => {
            (StatusCode::OK, Json(json!({ "data": { "unread_count": 2 } })))
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Missing or invalid token", "code": "UNAUTHORIZED" })),
        ),
    }
}

async fn my_incidents(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let items = match params.get("status").map(String::as_str) {
        Some("resolved") => vec![incident_json(2, "resolved")],
        _ => vec![incident_json(1, "pending"), incident_json(2, "resolved")],
    };
    Json(json!({ "data": items }))
}

async fn decide(Path(id): Path<i64>, Json(body): Json<Value>) -> impl IntoResponse {
    assert_eq!(body["decision"], "rejected");
    (
        StatusCode::CONFLICT,
        Json(json!({
            "error": format!("Request {id} was decided by someone else"),
            "code": "CONFLICT"
        })),
    )
}

async fn upload(mut multipart: Multipart) -> impl IntoResponse {
    let mut urls = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        assert_eq!(field.name(), Some("images"));
        let name = field.file_name().unwrap_or("file").to_string();
        let _ = field.bytes().await.unwrap();
        urls.push(format!("http://localhost:3000/uploads/{name}"));
    }
    (StatusCode::CREATED, Json(json!({ "images": urls })))
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(2)).await;
    Json(json!({ "status": "ok", "version": "0.1.0", "database": "ok" }))
}

fn mock_router() -> Router {
    Router::new()
        .route(
            "/health",
            get(|| async { Json(json!({ "status": "ok", "version": "0.1.0", "database": "ok" })) }),
        )
        .route("/api/announcements/unread-count", get(unread_count))
        .route("/api/incidents/mine", get(my_incidents))
        .route("/api/adoption-requests/{id}/decision", post(decide))
        .route("/api/upload-images", post(upload))
        .route("/api/clinics", get(slow))
}

#[tokio::test]
async fn bare_health_body_decodes() {
    let client = client_for(spawn(mock_router()).await);
    let health = client.health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.database, "ok");
}

#[tokio::test]
async fn bearer_token_is_attached() {
    let base = spawn(mock_router()).await;

    let anonymous = client_for(base.clone());
    let err = anonymous.unread_count().await.unwrap_err();
    assert_matches!(
        err,
        ClientError::Http { status: 401, ref message } if message == "Missing or invalid token"
    );

    let signed_in = client_for(base).with_token("good-token");
    assert_eq!(signed_in.unread_count().await.unwrap(), 2);
}

#[tokio::test]
async fn wrapped_list_decodes_with_status_filter() {
    let client = client_for(spawn(mock_router()).await).with_token("good-token");

    let all = client.my_incidents(None).await.unwrap();
    assert_eq!(all.len(), 2);

    let resolved = client.my_incidents(Some("resolved")).await.unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].status, IncidentStatus::Resolved);
}

#[tokio::test]
async fn rejection_without_reason_never_reaches_server() {
    // Port 9 on localhost has no listener; a request would fail as Network.
    let client = client_for("http://127.0.0.1:9".into());
    let err = client
        .decide_adoption_request(1, &DecisionForm::reject("  "))
        .await
        .unwrap_err();
    assert_matches!(err, ClientError::Validation(_));
}

#[tokio::test]
async fn server_error_message_is_surfaced() {
    let client = client_for(spawn(mock_router()).await).with_token("good-token");
    let err = client
        .decide_adoption_request(5, &DecisionForm::reject("No proof of residence"))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ClientError::Http { status: 409, ref message } if message == "Request 5 was decided by someone else"
    );
}

#[tokio::test]
async fn upload_returns_urls_in_order() {
    let client = client_for(spawn(mock_router()).await);
    let files = vec![
        ImageFile {
            file_name: "a.jpg".into(),
            content_type: "image/jpeg".into(),
            bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
        },
        ImageFile {
            file_name: "b.png".into(),
            content_type: "image/png".into(),
            bytes: vec![0x89, 0x50, 0x4E, 0x47],
        },
    ];
    let urls = client.upload_images(files).await.unwrap();
    assert_eq!(
        urls,
        vec![
            "http://localhost:3000/uploads/a.jpg".to_string(),
            "http://localhost:3000/uploads/b.png".to_string(),
        ]
    );
}

#[tokio::test]
async fn unsupported_image_type_is_rejected_locally() {
    let client = client_for("http://127.0.0.1:9".into());
    let files = vec![ImageFile {
        file_name: "notes.pdf".into(),
        content_type: "application/pdf".into(),
        bytes: vec![1, 2, 3],
    }];
    let err = client.upload_images(files).await.unwrap_err();
    assert_matches!(err, ClientError::Validation(_));
}

#[tokio::test]
async fn slow_response_times_out() {
    let base = spawn(mock_router()).await;
    let config = ClientConfig::new(&Environment::Deployed(base))
        .with_timeout(Duration::from_millis(200));
    let client = ApiClient::new(config);
    let err = client.list_clinics(None).await.unwrap_err();
    assert_matches!(err, ClientError::Timeout);
}

#[tokio::test]
async fn closed_port_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{addr}"));
    let err = client.list_catcher_teams().await.unwrap_err();
    assert_matches!(err, ClientError::Network(_));
}
