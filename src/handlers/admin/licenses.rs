use std::collections::HashSet;

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::code;
use crate::error::{AppError, Result};
use crate::extractors::{Form, Json, Path};
use crate::models::{License, LicenseStatus};
use crate::store::AppState;

/// Maximum number of codes one generate request may create.
const MAX_GENERATE_COUNT: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default)]
    pub note: String,
}

fn default_count() -> u32 {
    1
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub count: u32,
    pub licenses: Vec<String>,
}

/// POST /admin/generate-licenses - Bulk-create fresh license codes.
///
/// Candidate codes are regenerated on collision with an existing code;
/// with 36^16 possibilities this effectively never loops.
pub async fn generate_licenses(
    State(state): State<AppState>,
    Form(form): Form<GenerateForm>,
) -> Result<Json<GenerateResponse>> {
    if form.count < 1 || form.count > MAX_GENERATE_COUNT {
        return Err(AppError::BadRequest(format!(
            "count must be between 1 and {}",
            MAX_GENERATE_COUNT
        )));
    }

    let _guard = state.store.lock();
    let mut doc = state.store.load_licenses()?;

    let mut existing: HashSet<String> = doc.licenses.iter().map(|l| l.code.clone()).collect();
    let mut new_codes = Vec::with_capacity(form.count as usize);

    for _ in 0..form.count {
        let code = loop {
            let candidate = code::generate_code();
            if !existing.contains(&candidate) {
                break candidate;
            }
        };
        existing.insert(code.clone());
        doc.licenses.push(License::new(code.clone(), &form.note));
        new_codes.push(code);
    }

    state.store.save_licenses(&mut doc)?;
    tracing::info!("generated {} license codes", form.count);

    Ok(Json(GenerateResponse {
        success: true,
        count: form.count,
        licenses: new_codes,
    }))
}

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
}

/// POST /admin/delete-license/{code} - Remove one record entirely.
/// Deleting a code that does not exist is a no-op success.
pub async fn delete_license(
    State(state): State<AppState>,
    Path(license_code): Path<String>,
) -> Result<Json<AckResponse>> {
    let _guard = state.store.lock();
    let mut doc = state.store.load_licenses()?;
    let before = doc.licenses.len();
    doc.licenses.retain(|l| l.code != license_code);
    state.store.save_licenses(&mut doc)?;

    if doc.licenses.len() < before {
        tracing::info!("deleted license {}", license_code);
    }

    Ok(Json(AckResponse { success: true }))
}

/// POST /admin/revoke-license/{code} - Reset a record to `active` and clear
/// its device binding, making the code re-issuable. Despite the name this
/// un-assigns rather than permanently blocks; the `revoked` status value is
/// only reachable by editing the document directly.
pub async fn revoke_license(
    State(state): State<AppState>,
    Path(license_code): Path<String>,
) -> Result<Json<AckResponse>> {
    let _guard = state.store.lock();
    let mut doc = state.store.load_licenses()?;

    if let Some(license) = doc.licenses.iter_mut().find(|l| l.code == license_code) {
        license.status = LicenseStatus::Active;
        license.device_id = None;
        license.device_name = None;
        license.activated_at = None;
        tracing::info!("reset license {} to active", license_code);
    }

    state.store.save_licenses(&mut doc)?;

    Ok(Json(AckResponse { success: true }))
}
