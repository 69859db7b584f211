use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a license record.
///
/// `Revoked` is a terminal block honored by validation but only reachable
/// by editing the license document directly; the revoke endpoint resets a
/// record to `Active` instead (see the admin handlers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseStatus {
    Active,
    Used,
    Revoked,
    /// Any unrecognized status value in the persisted document.
    #[serde(other)]
    Unknown,
}

/// A license record: a unique code plus its binding/lifecycle state.
///
/// Device fields are serialized as explicit `null` while unbound, matching
/// the on-disk format the mobile client already knows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    pub code: String,
    pub status: LicenseStatus,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub activated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub note: String,
}

impl License {
    /// A fresh, unbound record with the given code and operator note.
    pub fn new(code: String, note: &str) -> Self {
        Self {
            code,
            status: LicenseStatus::Active,
            device_id: None,
            device_name: None,
            activated_at: None,
            created_at: Utc::now(),
            note: note.to_string(),
        }
    }

    /// The activation payload returned to devices on successful validation.
    pub fn activation_info(&self) -> ActivationInfo {
        ActivationInfo {
            code: self.code.clone(),
            activated_at: self.activated_at,
            device_name: self.device_name.clone(),
        }
    }
}

/// Subset of a license returned to a device after validation.
#[derive(Debug, Clone, Serialize)]
pub struct ActivationInfo {
    pub code: String,
    pub activated_at: Option<DateTime<Utc>>,
    pub device_name: Option<String>,
}

/// The persisted license document: an ordered list of records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LicenseDocument {
    pub licenses: Vec<License>,
    pub last_updated: DateTime<Utc>,
}

impl Default for LicenseDocument {
    fn default() -> Self {
        Self {
            licenses: Vec::new(),
            last_updated: Utc::now(),
        }
    }
}
