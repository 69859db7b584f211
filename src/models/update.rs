use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_VERSION_CODE: i64 = 1;
pub const DEFAULT_VERSION_NAME: &str = "1.0.0";
pub const DEFAULT_MAINTENANCE_TITLE: &str = "App Under Maintenance";
pub const DEFAULT_MAINTENANCE_MESSAGE: &str =
    "Sorry, the app is temporarily down for maintenance. Please try again shortly.";

/// The singleton update document.
///
/// Missing fields in the persisted JSON are backfilled with defaults on
/// load (struct-level `serde(default)`), so older documents written before
/// the maintenance fields existed still parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateInfo {
    pub version_code: i64,
    pub version_name: String,
    pub update_required: bool,
    pub update_title: String,
    pub update_message: String,
    pub download_url: String,
    pub whats_new: Vec<String>,
    pub maintenance_mode: bool,
    pub maintenance_title: String,
    pub maintenance_message: String,
    /// Free-form text shown to users, never parsed.
    pub maintenance_estimated_end: String,
    pub last_updated: DateTime<Utc>,
}

impl Default for UpdateInfo {
    fn default() -> Self {
        Self {
            version_code: DEFAULT_VERSION_CODE,
            version_name: DEFAULT_VERSION_NAME.to_string(),
            update_required: false,
            update_title: String::new(),
            update_message: String::new(),
            download_url: String::new(),
            whats_new: Vec::new(),
            maintenance_mode: false,
            maintenance_title: DEFAULT_MAINTENANCE_TITLE.to_string(),
            maintenance_message: DEFAULT_MAINTENANCE_MESSAGE.to_string(),
            maintenance_estimated_end: String::new(),
            last_updated: Utc::now(),
        }
    }
}
