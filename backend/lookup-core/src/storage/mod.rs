//! Local key-value persistence.
//!
//! Stands in for browser local storage: string keys mapped to JSON-encoded
//! string values, with a byte quota that rejects oversized writes.

pub mod file;
pub mod memory;

pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;

use crate::error::StorageError;

use std::collections::BTreeMap;

/// Default quota, matching the usual browser local storage allowance.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// String-keyed persistent storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace `key`. A rejected write leaves the store unchanged.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Bytes the entries would occupy after writing `key = value`.
pub(crate) fn usage_after_write(
    entries: &BTreeMap<String, String>,
    key: &str,
    value: &str,
) -> usize {
    entries
        .iter()
        .filter(|(existing, _)| existing.as_str() != key)
        .map(|(k, v)| k.len() + v.len())
        .sum::<usize>()
        + key.len()
        + value.len()
}

#[track_caller]
pub(crate) fn check_quota(
    entries: &BTreeMap<String, String>,
    key: &str,
    value: &str,
    quota: Option<usize>,
) -> Result<(), StorageError> {
    let Some(quota) = quota else {
        return Ok(());
    };

    let required = usage_after_write(entries, key, value);
    if required > quota {
        return Err(StorageError::quota_exceeded(key, required, quota));
    }

    Ok(())
}
