//! Errors raised by the local key-value store.
//!
//! A rejected write never changes the stored data; callers keep their
//! in-memory state untouched when they see one of these.

use common::ErrorLocation;

use std::panic::Location;
use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum StorageError {
    #[error("Storage Read Error: {path}: {source} {location}")]
    Read {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage Write Error: {path}: {source} {location}")]
    Write {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage Corrupt Error: {path}: {reason} {location}")]
    Corrupt {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error(
        "Storage Quota Exceeded: writing '{key}' needs {required} bytes, quota is {quota} {location}"
    )]
    QuotaExceeded {
        key: String,
        required: usize,
        quota: usize,
        location: ErrorLocation,
    },

    #[error("Storage Serialization Error: {reason} {location}")]
    Serialize {
        reason: String,
        location: ErrorLocation,
    },
}

impl StorageError {
    #[track_caller]
    pub fn quota_exceeded(key: impl Into<String>, required: usize, quota: usize) -> Self {
        StorageError::QuotaExceeded {
            key: key.into(),
            required,
            quota,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn serialize(reason: impl Into<String>) -> Self {
        StorageError::Serialize {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
