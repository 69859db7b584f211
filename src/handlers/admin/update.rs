use axum::extract::State;
use axum::response::Redirect;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extractors::{Form, Json};
use crate::models::{
    UpdateInfo, DEFAULT_MAINTENANCE_TITLE, DEFAULT_VERSION_CODE, DEFAULT_VERSION_NAME,
};
use crate::store::AppState;

/// The operator's update form. Checkboxes arrive as `"on"` when checked and
/// are absent otherwise; `whats_new[]` is a repeated key.
#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    #[serde(default = "default_version_code")]
    pub version_code: i64,
    #[serde(default = "default_version_name")]
    pub version_name: String,
    #[serde(default)]
    pub update_required: Option<String>,
    #[serde(default)]
    pub update_title: String,
    #[serde(default)]
    pub update_message: String,
    #[serde(default)]
    pub download_url: String,
    #[serde(rename = "whats_new[]", default)]
    pub whats_new: Vec<String>,
    #[serde(default)]
    pub maintenance_mode: Option<String>,
    #[serde(default = "default_maintenance_title")]
    pub maintenance_title: String,
    #[serde(default)]
    pub maintenance_message: String,
    #[serde(default)]
    pub maintenance_estimated_end: String,
}

fn default_version_code() -> i64 {
    DEFAULT_VERSION_CODE
}

fn default_version_name() -> String {
    DEFAULT_VERSION_NAME.to_string()
}

fn default_maintenance_title() -> String {
    DEFAULT_MAINTENANCE_TITLE.to_string()
}

fn checkbox_on(value: &Option<String>) -> bool {
    value.as_deref() == Some("on")
}

/// POST /admin/update - Replace the entire update document with the form
/// contents. Fields missing from the form take form defaults, not the
/// previously stored values; this is a full overwrite, not a patch.
pub async fn submit_update(
    State(state): State<AppState>,
    Form(form): Form<UpdateForm>,
) -> Result<Redirect> {
    let whats_new = form
        .whats_new
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect();

    let mut doc = UpdateInfo {
        version_code: form.version_code,
        version_name: form.version_name,
        update_required: checkbox_on(&form.update_required),
        update_title: form.update_title,
        update_message: form.update_message,
        download_url: form.download_url,
        whats_new,
        maintenance_mode: checkbox_on(&form.maintenance_mode),
        maintenance_title: form.maintenance_title,
        maintenance_message: form.maintenance_message,
        maintenance_estimated_end: form.maintenance_estimated_end,
        last_updated: Utc::now(),
    };

    let _guard = state.store.lock();
    state.store.save_update(&mut doc)?;
    tracing::info!(
        "update document replaced: version_code={} version_name={}",
        doc.version_code,
        doc.version_name
    );

    Ok(Redirect::to("/"))
}

#[derive(Debug, Serialize)]
pub struct ToggleMaintenanceResponse {
    pub success: bool,
    pub maintenance_mode: bool,
}

/// POST /admin/toggle-maintenance - Flip the maintenance flag in place,
/// leaving every other field untouched.
pub async fn toggle_maintenance(
    State(state): State<AppState>,
) -> Result<Json<ToggleMaintenanceResponse>> {
    let _guard = state.store.lock();
    let mut doc = state.store.load_update()?;
    doc.maintenance_mode = !doc.maintenance_mode;
    state.store.save_update(&mut doc)?;

    tracing::info!("maintenance mode toggled to {}", doc.maintenance_mode);

    Ok(Json(ToggleMaintenanceResponse {
        success: true,
        maintenance_mode: doc.maintenance_mode,
    }))
}
