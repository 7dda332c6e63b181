//! JSON-file credential store.
//!
//! The file holds a flat object, `{"token": "...", "user": "..."}`, the same
//! shape a browser keeps in local storage. It is read once at open and
//! rewritten after every mutation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use super::{CredentialStore, StorageKey};
use crate::core::error::{AppError, Result};

/// File-backed credential store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, loading existing entries if the file exists.
    ///
    /// A missing file is an empty store. A file that is not a JSON object of
    /// strings is an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                AppError::Storage(format!("{} is not a valid store: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(AppError::Storage(format!("failed to read {}: {}", path.display(), e)))
            }
        };

        tracing::debug!(path = %path.display(), entries = entries.len(), "Credential store opened");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Write failures are logged only; the in-memory entries stay authoritative.
    fn persist(&self, entries: &BTreeMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = fs::create_dir_all(parent) {
                    tracing::warn!(path = %parent.display(), error = %e, "Failed to create store directory");
                    return;
                }
            }
        }

        let json = match serde_json::to_string_pretty(entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize credential store");
                return;
            }
        };

        if let Err(e) = fs::write(&self.path, json) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to write credential store");
        }
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: StorageKey) -> Option<String> {
        self.entries.read().get(key.as_str()).cloned()
    }

    fn set(&self, key: StorageKey, value: String) {
        let mut entries = self.entries.write();
        entries.insert(key.as_str().to_string(), value);
        self.persist(&entries);
    }

    fn clear(&self) {
        let mut entries = self.entries.write();
        for key in StorageKey::all() {
            entries.remove(key.as_str());
        }
        self.persist(&entries);
    }
}
