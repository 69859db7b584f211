//! Flat-file JSON store for the two persisted documents.
//!
//! Every request reads its document fresh from disk and writes the whole
//! document back; there is no caching layer. A missing, empty, or corrupt
//! file is transparently reinitialized to the documented default, which is
//! persisted as a side effect of the load. Writers take a single
//! process-wide lock around each load-mutate-save sequence so concurrent
//! requests cannot drop each other's updates.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::models::{LicenseDocument, UpdateInfo};

pub const UPDATE_FILE: &str = "update_info.json";
pub const LICENSE_FILE: &str = "licenses.json";

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

/// Accessor for the update and license documents.
#[derive(Clone)]
pub struct Store {
    update_path: PathBuf,
    license_path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl Store {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            update_path: data_dir.join(UPDATE_FILE),
            license_path: data_dir.join(LICENSE_FILE),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn update_path(&self) -> &Path {
        &self.update_path
    }

    pub fn license_path(&self) -> &Path {
        &self.license_path
    }

    /// Acquire the global write lock.
    ///
    /// Hold the guard across a full load-mutate-save sequence. There are no
    /// await points inside those sequences, so a blocking mutex is fine.
    pub fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Ensure both documents exist and are parseable.
    ///
    /// Called once at startup; a load reinitializes defaults as needed.
    pub fn init(&self) -> Result<()> {
        self.load_update()?;
        self.load_licenses()?;
        Ok(())
    }

    /// Load the update document, reinitializing defaults if needed.
    pub fn load_update(&self) -> Result<UpdateInfo> {
        match self.load_document(&self.update_path) {
            Some(doc) => Ok(doc),
            None => {
                let mut doc = UpdateInfo::default();
                self.save_update(&mut doc)?;
                Ok(doc)
            }
        }
    }

    /// Overwrite the update document, stamping `last_updated`.
    pub fn save_update(&self, doc: &mut UpdateInfo) -> Result<()> {
        doc.last_updated = Utc::now();
        self.save_document(&self.update_path, doc)
    }

    /// Load the license document, reinitializing defaults if needed.
    pub fn load_licenses(&self) -> Result<LicenseDocument> {
        match self.load_document(&self.license_path) {
            Some(doc) => Ok(doc),
            None => {
                let mut doc = LicenseDocument::default();
                self.save_licenses(&mut doc)?;
                Ok(doc)
            }
        }
    }

    /// Overwrite the license document, stamping `last_updated`.
    pub fn save_licenses(&self, doc: &mut LicenseDocument) -> Result<()> {
        doc.last_updated = Utc::now();
        self.save_document(&self.license_path, doc)
    }

    /// Read and parse one document. Returns `None` when the file is absent,
    /// empty, or unreadable; the caller reinitializes and persists defaults.
    fn load_document<T: DeserializeOwned>(&self, path: &Path) -> Option<T> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("failed to read {}: {}", path.display(), e);
                return None;
            }
        };

        if content.trim().is_empty() {
            return None;
        }

        match serde_json::from_str(&content) {
            Ok(doc) => Some(doc),
            Err(e) => {
                tracing::warn!("corrupt document {}, reinitializing: {}", path.display(), e);
                None
            }
        }
    }

    /// Full-document overwrite, pretty-printed with 2-space indent.
    fn save_document<T: Serialize>(&self, path: &Path, doc: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(doc)?;
        fs::write(path, json)?;
        Ok(())
    }
}
