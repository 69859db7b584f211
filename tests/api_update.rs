//! Tests for the device-facing update endpoints:
//! GET /api/check-update, GET /api/update-info, GET /api/maintenance-status.

mod common;
use common::*;

/// Seed the update document with a known state.
fn seed_update(state: &AppState, version_code: i64, update_required: bool) {
    let mut doc = state.store.load_update().unwrap();
    doc.version_code = version_code;
    doc.version_name = format!("{}.0.0", version_code);
    doc.update_required = update_required;
    doc.update_title = "New version".to_string();
    doc.download_url = "https://example.com/app.apk".to_string();
    doc.whats_new = vec!["Fixed crashes".to_string(), "Faster sync".to_string()];
    state.store.save_update(&mut doc).unwrap();
}

#[tokio::test]
async fn test_check_update_reports_newer_version() {
    let (state, _dir) = test_state();
    seed_update(&state, 5, false);
    let app = app(state);

    let response = get(&app, "/api/check-update?current_version_code=3").await;
    assert_eq!(response.status(), 200);

    let json = body_json(response).await;
    assert_eq!(json["has_update"], true);
    assert_eq!(json["current_version"], 3);
    assert_eq!(json["latest_version"], 5);
    assert_eq!(json["latest_version_name"], "5.0.0");
    assert_eq!(json["download_url"], "https://example.com/app.apk");
    assert_eq!(json["whats_new"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_check_update_gates_update_required() {
    let (state, _dir) = test_state();
    // update_required is stored true, but the client is already current
    seed_update(&state, 3, true);
    let app = app(state);

    let response = get(&app, "/api/check-update?current_version_code=3").await;
    let json = body_json(response).await;

    assert_eq!(json["has_update"], false);
    assert_eq!(
        json["update_required"], false,
        "update_required must not leak through when no newer version exists"
    );

    // A client ahead of the store is also not forced to update
    let response = get(&app, "/api/check-update?current_version_code=9").await;
    let json = body_json(response).await;
    assert_eq!(json["has_update"], false);
    assert_eq!(json["update_required"], false);
}

#[tokio::test]
async fn test_check_update_required_with_newer_version() {
    let (state, _dir) = test_state();
    seed_update(&state, 5, true);
    let app = app(state);

    let response = get(&app, "/api/check-update?current_version_code=1").await;
    let json = body_json(response).await;

    assert_eq!(json["has_update"], true);
    assert_eq!(json["update_required"], true);
}

#[tokio::test]
async fn test_check_update_defaults_current_version() {
    let (state, _dir) = test_state();
    seed_update(&state, 2, false);
    let app = app(state);

    let response = get(&app, "/api/check-update").await;
    let json = body_json(response).await;

    assert_eq!(json["current_version"], 1);
    assert_eq!(json["has_update"], true);
}

#[tokio::test]
async fn test_check_update_rejects_malformed_version() {
    let (state, _dir) = test_state();
    let app = app(state);

    let response = get(&app, "/api/check-update?current_version_code=banana").await;
    assert_eq!(response.status(), 400);

    let json = body_json(response).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_update_info_returns_full_document() {
    let (state, _dir) = test_state();
    seed_update(&state, 4, true);
    let app = app(state);

    let response = get(&app, "/api/update-info").await;
    assert_eq!(response.status(), 200);

    let json = body_json(response).await;
    assert_eq!(json["version_code"], 4);
    assert_eq!(json["version_name"], "4.0.0");
    assert_eq!(json["update_required"], true);
    assert_eq!(json["maintenance_mode"], false);
    assert!(json.get("maintenance_title").is_some());
    assert!(json.get("last_updated").is_some());
}

#[tokio::test]
async fn test_maintenance_status_returns_only_maintenance_fields() {
    let (state, _dir) = test_state();
    {
        let mut doc = state.store.load_update().unwrap();
        doc.maintenance_mode = true;
        doc.maintenance_title = "Down for upgrades".to_string();
        doc.maintenance_message = "Back soon".to_string();
        doc.maintenance_estimated_end = "tonight".to_string();
        state.store.save_update(&mut doc).unwrap();
    }
    let app = app(state);

    let response = get(&app, "/api/maintenance-status").await;
    assert_eq!(response.status(), 200);

    let json = body_json(response).await;
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 4, "maintenance status carries exactly four fields");
    assert_eq!(json["maintenance_mode"], true);
    assert_eq!(json["maintenance_title"], "Down for upgrades");
    assert_eq!(json["maintenance_message"], "Back soon");
    assert_eq!(json["maintenance_estimated_end"], "tonight");
}

#[tokio::test]
async fn test_health() {
    let (state, _dir) = test_state();
    let app = app(state);

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), 200);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json.get("version").is_some());
}
