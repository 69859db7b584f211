mod licenses;
mod update;

pub use licenses::*;
pub use update::*;

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::error::Result;
use crate::extractors::Json;
use crate::models::{License, LicenseStatus, UpdateInfo};
use crate::store::AppState;

#[derive(Debug, Serialize)]
pub struct LicenseStats {
    pub total: usize,
    pub active: usize,
    pub used: usize,
}

#[derive(Debug, Serialize)]
pub struct AdminOverview {
    pub update_info: UpdateInfo,
    pub licenses: Vec<License>,
    pub stats: LicenseStats,
}

/// GET / - Operator overview: the update document, every license record,
/// and summary statistics. Rendering is left to the consumer.
async fn overview(State(state): State<AppState>) -> Result<Json<AdminOverview>> {
    let update_info = state.store.load_update()?;
    let doc = state.store.load_licenses()?;

    let stats = LicenseStats {
        total: doc.licenses.len(),
        active: doc
            .licenses
            .iter()
            .filter(|l| l.status == LicenseStatus::Active)
            .count(),
        used: doc
            .licenses
            .iter()
            .filter(|l| l.status == LicenseStatus::Used)
            .count(),
    };

    Ok(Json(AdminOverview {
        update_info,
        licenses: doc.licenses,
        stats,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(overview))
        .route("/admin/update", post(submit_update))
        .route("/admin/toggle-maintenance", post(toggle_maintenance))
        .route("/admin/generate-licenses", post(generate_licenses))
        .route("/admin/delete-license/{code}", post(delete_license))
        .route("/admin/revoke-license/{code}", post(revoke_license))
}
