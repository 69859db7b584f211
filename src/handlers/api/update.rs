use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extractors::{Json, Query};
use crate::models::UpdateInfo;
use crate::store::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckUpdateParams {
    #[serde(default = "default_version_code")]
    pub current_version_code: i64,
}

fn default_version_code() -> i64 {
    1
}

#[derive(Debug, Serialize)]
pub struct CheckUpdateResponse {
    pub has_update: bool,
    pub current_version: i64,
    pub latest_version: i64,
    pub latest_version_name: String,
    pub update_required: bool,
    pub update_title: String,
    pub update_message: String,
    pub download_url: String,
    pub whats_new: Vec<String>,
    pub maintenance_mode: bool,
    pub maintenance_title: String,
    pub maintenance_message: String,
    pub maintenance_estimated_end: String,
    pub last_updated: DateTime<Utc>,
}

/// GET /api/check-update - Update availability check for devices.
///
/// `update_required` is gated by `has_update`: a client already on the
/// latest version is never told an update is mandatory, even when the
/// stored flag is set.
pub async fn check_update(
    State(state): State<AppState>,
    Query(params): Query<CheckUpdateParams>,
) -> Result<Json<CheckUpdateResponse>> {
    let info = state.store.load_update()?;
    let has_update = info.version_code > params.current_version_code;

    Ok(Json(CheckUpdateResponse {
        has_update,
        current_version: params.current_version_code,
        latest_version: info.version_code,
        latest_version_name: info.version_name,
        update_required: info.update_required && has_update,
        update_title: info.update_title,
        update_message: info.update_message,
        download_url: info.download_url,
        whats_new: info.whats_new,
        maintenance_mode: info.maintenance_mode,
        maintenance_title: info.maintenance_title,
        maintenance_message: info.maintenance_message,
        maintenance_estimated_end: info.maintenance_estimated_end,
        last_updated: info.last_updated,
    }))
}

/// GET /api/update-info - The full update document, verbatim.
pub async fn update_info(State(state): State<AppState>) -> Result<Json<UpdateInfo>> {
    Ok(Json(state.store.load_update()?))
}

#[derive(Debug, Serialize)]
pub struct MaintenanceStatusResponse {
    pub maintenance_mode: bool,
    pub maintenance_title: String,
    pub maintenance_message: String,
    pub maintenance_estimated_end: String,
}

/// GET /api/maintenance-status - Maintenance fields only, independent of
/// update state.
pub async fn maintenance_status(
    State(state): State<AppState>,
) -> Result<Json<MaintenanceStatusResponse>> {
    let info = state.store.load_update()?;

    Ok(Json(MaintenanceStatusResponse {
        maintenance_mode: info.maintenance_mode,
        maintenance_title: info.maintenance_title,
        maintenance_message: info.maintenance_message,
        maintenance_estimated_end: info.maintenance_estimated_end,
    }))
}
