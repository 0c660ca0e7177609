//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt;
use trx_store::{
    api::{create_router, REPLAYED_HEADER},
    AppState, IdempotencyStore, StoreConfig,
};
use uuid::Uuid;

// == Helper Functions ==

fn create_test_app() -> Router {
    let store = IdempotencyStore::new(Duration::from_secs(300));
    create_router(AppState::new(store))
}

fn operation_request(key: Option<&str>, body: &'static str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/operations")
        .header("content-type", "application/json");
    if let Some(key) = key {
        builder = builder.header("Idempotency-Key", key);
    }
    builder.body(Body::from(body)).unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_to_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

const CHARGE: &str = r#"{"description":"charge","amount":1250}"#;

// == OPERATION Endpoint Tests ==

#[tokio::test]
async fn test_operation_first_call_executes() {
    let app = create_test_app();
    let key = Uuid::new_v4().to_string();

    let response = app
        .oneshot(operation_request(Some(key.as_str()), CHARGE))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[REPLAYED_HEADER], "false");
    let json = body_to_json(response).await;
    assert_eq!(json["operation_id"].as_str().unwrap(), key);
    assert_eq!(json["amount"].as_i64().unwrap(), 1250);
    assert!(json.get("result_id").is_some());
}

#[tokio::test]
async fn test_operation_retry_replays_identical_bytes() {
    let app = create_test_app();
    let key = Uuid::new_v4().to_string();

    let first = app
        .clone()
        .oneshot(operation_request(Some(key.as_str()), CHARGE))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);
    let first_body = body_bytes(first).await;

    let retry = app
        .oneshot(operation_request(Some(key.as_str()), CHARGE))
        .await
        .unwrap();
    assert_eq!(retry.status(), StatusCode::OK);
    assert_eq!(retry.headers()[REPLAYED_HEADER], "true");

    assert_eq!(body_bytes(retry).await, first_body);
}

#[tokio::test]
async fn test_operation_distinct_keys_execute_separately() {
    let app = create_test_app();

    let first = app
        .clone()
        .oneshot(operation_request(Some(Uuid::new_v4().to_string().as_str()), CHARGE))
        .await
        .unwrap();
    let second = app
        .oneshot(operation_request(Some(Uuid::new_v4().to_string().as_str()), CHARGE))
        .await
        .unwrap();

    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(second.status(), StatusCode::CREATED);
    let first = body_to_json(first).await;
    let second = body_to_json(second).await;
    assert_ne!(first["result_id"], second["result_id"]);
}

#[tokio::test]
async fn test_operation_missing_key() {
    let app = create_test_app();

    let response = app.oneshot(operation_request(None, CHARGE)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Idempotency-Key"));
}

#[tokio::test]
async fn test_operation_invalid_key() {
    let app = create_test_app();

    let response = app
        .oneshot(operation_request(Some("order-42"), CHARGE))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_operation_invalid_amount() {
    let app = create_test_app();
    let key = Uuid::new_v4().to_string();

    let response = app
        .oneshot(operation_request(
            Some(key.as_str()),
            r#"{"description":"charge","amount":0}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app();
    let key = Uuid::new_v4().to_string();

    let response = app
        .oneshot(operation_request(Some(key.as_str()), r#"{"invalid json"#))
        .await
        .unwrap();

    // Axum returns 400 or 422 for JSON parsing errors
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}

// == STATS Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app();
    let key = Uuid::new_v4().to_string();

    // Miss then store, then hit on retry
    for _ in 0..2 {
        let _ = app
            .clone()
            .oneshot(operation_request(Some(key.as_str()), CHARGE))
            .await
            .unwrap();
    }

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;

    assert_eq!(json["hits"].as_u64().unwrap(), 1);
    assert_eq!(json["misses"].as_u64().unwrap(), 1);
    assert_eq!(json["stores"].as_u64().unwrap(), 1);
    assert_eq!(json["total_entries"].as_u64().unwrap(), 1);
    assert!(json.get("hit_rate").is_some());
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}

// == TTL Expiration via API Tests ==

#[tokio::test]
async fn test_expired_result_executes_again() {
    let config = StoreConfig::new(Duration::from_millis(50))
        .with_sweep_period(Duration::from_millis(20));
    let store = IdempotencyStore::with_config(config, None).unwrap();
    let app = create_router(AppState::new(store));
    let key = Uuid::new_v4().to_string();

    let first = app
        .clone()
        .oneshot(operation_request(Some(key.as_str()), CHARGE))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    // Wait for TTL plus a few sweeps
    tokio::time::sleep(Duration::from_millis(300)).await;

    let after_expiry = app
        .oneshot(operation_request(Some(key.as_str()), CHARGE))
        .await
        .unwrap();
    assert_eq!(after_expiry.status(), StatusCode::CREATED);
}
