//! Router-level tests for the data API, driven through `tower::ServiceExt`
//! against the in-memory storage backend.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use courtside_api::config::ApiConfig;
use courtside_api::kv::MemoryKv;
use courtside_api::routes;
use courtside_api::state::AppState;

const PASSWORD: &str = "clay-court-pass";

fn test_state() -> AppState {
    let config = ApiConfig {
        database_url: SecretString::from("postgres://unused/test"),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        admin_password: SecretString::from(PASSWORD),
        sentry_dsn: None,
    };
    AppState::new(config, Arc::new(MemoryKv::new()))
}

fn app(state: &AppState) -> Router {
    routes::router().with_state(state.clone())
}

async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = app(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get_data(collection: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(format!("/api/data?type={collection}"))
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn login(state: &AppState) -> String {
    let (status, body) = send(state, post_json("/api/auth", &json!({"password": PASSWORD}), None)).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_get_requires_valid_type() {
    let state = test_state();

    let (status, body) = send(&state, get_data("members")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Invalid type. Use: events, programs, posts, announcements, products"
    );

    let request = Request::builder()
        .method("GET")
        .uri("/api/data")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&state, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_empty_collection_returns_empty_list() {
    let state = test_state();
    let (status, body) = send(&state, get_data("events")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_mutation_without_token_is_unauthorized_and_leaves_data_intact() {
    let state = test_state();
    state.store().seed().await.unwrap();

    let command = json!({
        "type": "events",
        "action": "update",
        "id": "evt-001",
        "data": {"registered": 25}
    });
    let (status, body) = send(&state, post_json("/api/data", &command, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (_, events) = send(&state, get_data("events")).await;
    let evt = events
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["id"] == "evt-001")
        .unwrap();
    assert_eq!(evt["registered"], 24);
}

#[tokio::test]
async fn test_bogus_token_is_unauthorized() {
    let state = test_state();
    let command = json!({"type": "events", "action": "create", "data": {"title": "x"}});
    let (status, _) = send(&state, post_json("/api/data", &command, Some("deadbeef"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_wrong_or_missing_password() {
    let state = test_state();

    let (status, body) =
        send(&state, post_json("/api/auth", &json!({"password": "nope"}), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid password");

    let (status, body) = send(&state, post_json("/api/auth", &json!({}), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Password required");
}

#[tokio::test]
async fn test_login_issues_hex_token() {
    let state = test_state();
    let token = login(&state).await;
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn test_create_update_delete_flow() {
    let state = test_state();
    let token = login(&state).await;

    // create
    let command = json!({
        "type": "events",
        "action": "create",
        "data": {"title": "Night Doubles", "date": "2026-06-01", "price": 20}
    });
    let (status, body) = send(&state, post_json("/api/data", &command, Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let id = body["item"]["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("evt-"));
    assert!(body["item"]["createdAt"].is_string());

    // update
    let command = json!({
        "type": "events",
        "action": "update",
        "id": id,
        "data": {"visible": false}
    });
    let (status, body) = send(&state, post_json("/api/data", &command, Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"]["visible"], false);
    assert!(body["item"]["updatedAt"].is_string());

    // delete
    let command = json!({"type": "events", "action": "delete", "id": id});
    let (status, body) = send(&state, post_json("/api/data", &command, Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (_, events) = send(&state, get_data("events")).await;
    assert_eq!(events, json!([]));
}

#[tokio::test]
async fn test_update_and_delete_missing_id_are_not_found() {
    let state = test_state();
    let token = login(&state).await;

    let command = json!({
        "type": "posts",
        "action": "update",
        "id": "post-missing",
        "data": {"title": "x"}
    });
    let (status, body) = send(&state, post_json("/api/data", &command, Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Item not found");

    let command = json!({"type": "posts", "action": "delete", "id": "post-missing"});
    let (status, _) = send(&state, post_json("/api/data", &command, Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_validation_errors() {
    let state = test_state();
    let token = login(&state).await;

    // unknown action
    let command = json!({"type": "events", "action": "upsert"});
    let (status, body) = send(&state, post_json("/api/data", &command, Some(&token))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid action. Use: create, update, delete, save");

    // bad type on mutation
    let command = json!({"type": "members", "action": "create", "data": {}});
    let (status, body) = send(&state, post_json("/api/data", &command, Some(&token))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid type");

    // create without data
    let command = json!({"type": "events", "action": "create"});
    let (status, body) = send(&state, post_json("/api/data", &command, Some(&token))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing data");

    // update without id
    let command = json!({"type": "events", "action": "update", "data": {"x": 1}});
    let (status, body) = send(&state, post_json("/api/data", &command, Some(&token))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing id or data");

    // save with non-array data
    let command = json!({"type": "events", "action": "save", "data": {"not": "a list"}});
    let (status, body) = send(&state, post_json("/api/data", &command, Some(&token))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Data must be an array");
}

#[tokio::test]
async fn test_malformed_json_body_is_bad_request() {
    let state = test_state();
    let token = login(&state).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/data")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&state, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON body");
}

#[tokio::test]
async fn test_save_replaces_collection_wholesale() {
    let state = test_state();
    let token = login(&state).await;
    state.store().seed().await.unwrap();

    let replacement = json!([{"id": "prod-900", "title": "Vibration Dampener", "price": 6}]);
    let command = json!({"type": "products", "action": "save", "data": replacement});
    let (status, _) = send(&state, post_json("/api/data", &command, Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, products) = send(&state, get_data("products")).await;
    assert_eq!(products, replacement);
}

#[tokio::test]
async fn test_seed_endpoint_is_idempotent() {
    let state = test_state();

    let (status, body) = send(&state, post_json("/api/seed", &json!({}), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Default data seeded");
    assert_eq!(body["types"].as_array().unwrap().len(), 5);

    let (status, body) = send(&state, post_json("/api/seed", &json!({}), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Data already seeded");
    assert!(body.get("types").is_none());

    let (_, events) = send(&state, get_data("events")).await;
    assert_eq!(events.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_options_answers_no_content_with_cors_headers() {
    let state = test_state();
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/data")
        .body(Body::empty())
        .unwrap();
    let response = app(&state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_responses_carry_cors_headers() {
    let state = test_state();
    let response = app(&state).oneshot(get_data("events")).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}
