//! HTTP tests for contact submission and health
//!
//! The router runs against the in-memory store, so no database is needed.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use intake_server::{api::create_router, config::Config, store::MemoryContactStore, ContactStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

// ============================================================================
// Helper Functions
// ============================================================================

fn create_test_app() -> (Router, Arc<MemoryContactStore>) {
    let store = Arc::new(MemoryContactStore::new());
    let app = create_router(store.clone(), &Config::default());
    (app, store)
}

fn valid_contact() -> Value {
    json!({
        "first_name": "John",
        "second_name": "Doe",
        "email": "j@d.com",
        "phone": "0123456789",
        "eircode": "1D09AB"
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };

    (status, json)
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

// ============================================================================
// Submission
// ============================================================================

#[tokio::test]
async fn test_submit_json_returns_created_with_id() {
    let (app, store) = create_test_app();

    let (status, body) = post_json(&app, "/submit", valid_contact()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], 1);

    let stored = store.contacts();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].first_name, "John");
    assert_eq!(stored[0].eircode, "1D09AB");
}

#[tokio::test]
async fn test_submit_on_versioned_path() {
    let (app, store) = create_test_app();

    let (status, body) = post_json(&app, "/api/v1/contacts", valid_contact()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_submit_form_encoded() {
    let (app, store) = create_test_app();

    let request = Request::builder()
        .uri("/submit")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "first_name=Ann&second_name=Lee&email=ann%40lee.ie&phone=0871234567&eircode=2A34BC",
        ))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(store.contacts()[0].email, "ann@lee.ie");
}

#[tokio::test]
async fn test_submit_trims_fields_before_storing() {
    let (app, store) = create_test_app();
    let mut contact = valid_contact();
    contact["first_name"] = json!("  John ");
    contact["email"] = json!(" j@d.com");

    let (status, _) = post_json(&app, "/submit", contact).await;

    assert_eq!(status, StatusCode::CREATED);
    let stored = store.contacts();
    assert_eq!(stored[0].first_name, "John");
    assert_eq!(stored[0].email, "j@d.com");
}

#[tokio::test]
async fn test_submit_invalid_phone_is_rejected() {
    let (app, store) = create_test_app();
    let mut contact = valid_contact();
    contact["phone"] = json!("123");

    let (status, body) = post_json(&app, "/submit", contact).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["error"]["details"],
        json!(["Submission: Invalid phone (must contain exactly 10 digits)."])
    );
    assert!(store.contacts().is_empty());
}

#[tokio::test]
async fn test_submit_reports_every_format_error() {
    let (app, _store) = create_test_app();
    let body = json!({
        "first_name": "J@hn",
        "second_name": "Doe",
        "email": "not-an-email",
        "phone": "0123456789",
        "eircode": "ABCDEF"
    });

    let (status, body) = post_json(&app, "/submit", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let details = body["error"]["details"].as_array().unwrap();
    assert_eq!(details.len(), 3);
    assert!(details[0].as_str().unwrap().contains("Invalid first_name"));
    assert!(details[1].as_str().unwrap().contains("Invalid email format"));
    assert!(details[2].as_str().unwrap().contains("Invalid eircode"));
}

#[tokio::test]
async fn test_submit_missing_fields() {
    let (app, store) = create_test_app();

    let (status, body) = post_json(&app, "/submit", json!({ "first_name": "John" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let details = body["error"]["details"].as_array().unwrap();
    assert_eq!(details.len(), 4);
    assert_eq!(details[0], "Submission: Missing second_name");
    assert_eq!(details[3], "Submission: Missing eircode");
    assert_eq!(store.schema_calls(), 0);
}

#[tokio::test]
async fn test_submit_numeric_phone_is_taken_as_text() {
    let (app, store) = create_test_app();
    let mut contact = valid_contact();
    contact["phone"] = json!(1234567890);

    let (status, _) = post_json(&app, "/submit", contact).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(store.contacts()[0].phone, "1234567890");
}

#[tokio::test]
async fn test_submit_short_numeric_phone_fails_validation() {
    let (app, _store) = create_test_app();
    let mut contact = valid_contact();
    contact["phone"] = json!(123);

    let (status, body) = post_json(&app, "/submit", contact).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["error"]["details"],
        json!(["Submission: Invalid phone (must contain exactly 10 digits)."])
    );
}

#[tokio::test]
async fn test_submit_null_field_is_missing() {
    let (app, _store) = create_test_app();
    let mut contact = valid_contact();
    contact["eircode"] = Value::Null;

    let (status, body) = post_json(&app, "/submit", contact).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"], json!(["Submission: Missing eircode"]));
}

#[tokio::test]
async fn test_submit_nested_value_is_unprocessable() {
    let (app, store) = create_test_app();
    let mut contact = valid_contact();
    contact["email"] = json!(["j@d.com"]);

    let (status, body) = post_json(&app, "/submit", contact).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    assert!(store.contacts().is_empty());
}

#[tokio::test]
async fn test_submit_unsupported_content_type() {
    let (app, _store) = create_test_app();

    let request = Request::builder()
        .uri("/submit")
        .method("POST")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("John Doe"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
}

#[tokio::test]
async fn test_submit_malformed_json() {
    let (app, _store) = create_test_app();

    let request = Request::builder()
        .uri("/submit")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"first_name\": "))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_submit_store_failure_hides_details() {
    let (app, store) = create_test_app();
    store.reject_email("j@d.com");

    let (status, body) = post_json(&app, "/submit", valid_contact()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["message"], "Failed to store contact");
    assert!(!body.to_string().contains("j@d.com"));
}

#[tokio::test]
async fn test_submit_schema_failure() {
    let (app, store) = create_test_app();
    store.fail_schema();

    let (status, body) = post_json(&app, "/submit", valid_contact()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["message"], "Server schema initialization error");
    assert!(store.contacts().is_empty());
}

#[tokio::test]
async fn test_submissions_get_increasing_ids() {
    let (app, _store) = create_test_app();

    let (_, first) = post_json(&app, "/submit", valid_contact()).await;
    let (_, second) = post_json(&app, "/submit", valid_contact()).await;

    assert!(second["data"]["id"].as_i64().unwrap() > first["data"]["id"].as_i64().unwrap());
}

// ============================================================================
// Middleware
// ============================================================================

#[tokio::test]
async fn test_cors_preflight_for_configured_origin() {
    let (app, _store) = create_test_app();

    let request = Request::builder()
        .uri("/submit")
        .method("OPTIONS")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn test_response_is_compressed_on_request() {
    let (app, _store) = create_test_app();

    let request = Request::builder()
        .uri("/health")
        .header(header::ACCEPT_ENCODING, "gzip")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_ENCODING], "gzip");
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let (app, _store) = create_test_app();

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_check_after_close() {
    let (app, store) = create_test_app();
    store.close().await;

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
}
