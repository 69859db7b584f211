//! Test utilities and fixtures for Appcast integration tests

#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub use appcast::models::*;
pub use appcast::store::{AppState, Store};

/// Create an app state backed by a fresh temporary data directory.
///
/// The `TempDir` must be kept alive for the duration of the test.
pub fn test_state() -> (AppState, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = Store::new(dir.path());
    store.init().expect("Failed to initialize store");
    (AppState { store }, dir)
}

/// Build the full application router (operator + device endpoints).
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(appcast::handlers::admin::router())
        .merge(appcast::handlers::api::router())
        .with_state(state)
}

/// Append a license record with the given state directly through the store.
pub fn seed_license(
    store: &Store,
    code: &str,
    status: LicenseStatus,
    device_id: Option<&str>,
    device_name: Option<&str>,
) {
    let mut doc = store.load_licenses().expect("Failed to load licenses");
    let mut license = License::new(code.to_string(), "test");
    license.status = status;
    license.device_id = device_id.map(String::from);
    license.device_name = device_name.map(String::from);
    if status == LicenseStatus::Used {
        license.activated_at = Some(chrono::Utc::now());
    }
    doc.licenses.push(license);
    store.save_licenses(&mut doc).expect("Failed to save licenses");
}

pub async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn post_empty(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).expect("Response should be valid JSON")
}

/// Assert that a code matches `XXXX-XXXX-XXXX-XXXX` with uppercase
/// alphanumeric blocks.
pub fn assert_code_format(code: &str) {
    let blocks: Vec<&str> = code.split('-').collect();
    assert_eq!(blocks.len(), 4, "code {} should have four blocks", code);
    for block in blocks {
        assert_eq!(block.len(), 4, "code {} blocks should be 4 chars", code);
        assert!(
            block
                .bytes()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()),
            "code {} should be uppercase alphanumeric",
            code
        );
    }
}
