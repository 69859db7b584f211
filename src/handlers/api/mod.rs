mod license;
mod update;

pub use license::*;
pub use update::*;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::store::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/check-update", get(check_update))
        .route("/api/update-info", get(update_info))
        .route("/api/maintenance-status", get(maintenance_status))
        .route("/api/validate-license", post(validate_license))
        .route("/api/check-license", post(check_license))
}
