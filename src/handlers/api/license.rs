use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::code;
use crate::error::Result;
use crate::extractors::Json;
use crate::models::{ActivationInfo, LicenseStatus};
use crate::store::AppState;

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub license_code: String,
    #[serde(default)]
    pub device_id: String,
    #[serde(default = "default_device_name")]
    pub device_name: String,
}

fn default_device_name() -> String {
    "Unknown Device".to_string()
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_info: Option<ActivationInfo>,
}

impl ValidateResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            license_info: None,
        }
    }

    fn success(message: impl Into<String>, info: ActivationInfo) -> Self {
        Self {
            success: true,
            message: message.into(),
            license_info: Some(info),
        }
    }
}

/// POST /api/validate-license - Activate a license for a device, or verify
/// an existing activation.
///
/// Expected negative outcomes (unknown code, revoked, bound to another
/// device) are payload-level failures with HTTP 200 so the mobile client
/// can show the message; only a missing code/device id is a 400.
pub async fn validate_license(
    State(state): State<AppState>,
    Json(req): Json<ValidateRequest>,
) -> Result<(StatusCode, Json<ValidateResponse>)> {
    let license_code = req.license_code.trim().to_uppercase();
    let device_id = req.device_id.trim().to_string();

    if license_code.is_empty() || device_id.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ValidateResponse::failure(
                "License code and device ID are required",
            )),
        ));
    }

    // Cheap format check before scanning the store.
    if !code::is_valid_code(&license_code) {
        return Ok((
            StatusCode::OK,
            Json(ValidateResponse::failure("Invalid license code")),
        ));
    }

    let _guard = state.store.lock();
    let mut doc = state.store.load_licenses()?;

    let Some(idx) = doc.licenses.iter().position(|l| l.code == license_code) else {
        return Ok((
            StatusCode::OK,
            Json(ValidateResponse::failure("Invalid license code")),
        ));
    };

    let license = &mut doc.licenses[idx];
    let response = match license.status {
        LicenseStatus::Revoked => {
            ValidateResponse::failure("License code has been revoked by an administrator")
        }
        LicenseStatus::Used => {
            if license.device_id.as_deref() == Some(device_id.as_str()) {
                ValidateResponse::success(
                    "License is valid for this device",
                    license.activation_info(),
                )
            } else {
                let other = license
                    .device_name
                    .as_deref()
                    .unwrap_or("unknown device");
                ValidateResponse::failure(format!(
                    "License code is already in use on another device ({})",
                    other
                ))
            }
        }
        LicenseStatus::Active => {
            license.status = LicenseStatus::Used;
            license.device_id = Some(device_id);
            license.device_name = Some(req.device_name);
            license.activated_at = Some(Utc::now());
            let info = license.activation_info();

            state.store.save_licenses(&mut doc)?;
            tracing::info!("license {} activated", license_code);

            ValidateResponse::success("License activated for this device", info)
        }
        LicenseStatus::Unknown => ValidateResponse::failure("License status is not valid"),
    };

    Ok((StatusCode::OK, Json(response)))
}

#[derive(Debug, Deserialize)]
pub struct CheckLicenseRequest {
    #[serde(default)]
    pub device_id: String,
}

#[derive(Debug, Serialize)]
pub struct CheckLicenseResponse {
    pub valid: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_info: Option<ActivationInfo>,
}

/// POST /api/check-license - Verify that a device still holds a used
/// license. Read-only scan; never mutates the store.
pub async fn check_license(
    State(state): State<AppState>,
    Json(req): Json<CheckLicenseRequest>,
) -> Result<Json<CheckLicenseResponse>> {
    let device_id = req.device_id.trim();

    if device_id.is_empty() {
        return Ok(Json(CheckLicenseResponse {
            valid: false,
            message: "Device ID is not valid".to_string(),
            license_info: None,
        }));
    }

    let doc = state.store.load_licenses()?;

    let bound = doc.licenses.iter().find(|l| {
        l.status == LicenseStatus::Used && l.device_id.as_deref() == Some(device_id)
    });

    match bound {
        Some(license) => Ok(Json(CheckLicenseResponse {
            valid: true,
            message: "License is active".to_string(),
            license_info: Some(license.activation_info()),
        })),
        None => Ok(Json(CheckLicenseResponse {
            valid: false,
            message: "License not found or revoked".to_string(),
            license_info: None,
        })),
    }
}
