use super::{DEFAULT_QUOTA_BYTES, KeyValueStore, check_quota};
use crate::error::StorageError;

use common::ErrorLocation;

use std::collections::BTreeMap;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use log::{debug, trace};

const STORAGE_FILE_NAME: &str = "storage.json";

/// Key-value store persisted as a single JSON object in `{dir}/storage.json`.
///
/// Every write rewrites the file through a temp file + rename, so a crash
/// mid-write leaves the previous contents intact.
pub struct FileKeyValueStore {
    path: PathBuf,
    quota: Option<usize>,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn open(dir: &Path) -> Self {
        Self {
            path: dir.join(STORAGE_FILE_NAME),
            quota: Some(DEFAULT_QUOTA_BYTES),
            lock: Mutex::new(()),
        }
    }

    /// Override the byte quota; `None` disables it.
    pub fn with_quota(mut self, quota: Option<usize>) -> Self {
        self.quota = quota;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[track_caller]
    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            trace!("Storage file {} not present, treating as empty", self.path.display());
            return Ok(BTreeMap::new());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| StorageError::Read {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            source: e,
        })?;

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| StorageError::Corrupt {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    #[track_caller]
    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Write {
                location: ErrorLocation::from(Location::caller()),
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::serialize(e.to_string()))?;

        let temp_path = self.path.with_extension("json.tmp");

        std::fs::write(&temp_path, json).map_err(|e| StorageError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| StorageError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            source: e,
        })?;

        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.read_entries()?;
        check_quota(&entries, key, value, self.quota)?;

        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)?;

        debug!("Stored '{key}' in {}", self.path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.read_entries()?;
        if entries.remove(key).is_none() {
            trace!("Remove of absent key '{key}' ignored");
            return Ok(());
        }

        self.write_entries(&entries)?;

        debug!("Removed '{key}' from {}", self.path.display());
        Ok(())
    }
}
