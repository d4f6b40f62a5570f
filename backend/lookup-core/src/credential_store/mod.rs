//! Persisted API credentials and the data-mode preference.
//!
//! # Storage layout
//! - `einforma_credentials`: `{"clientId": "...", "clientSecret": "..."}`
//! - `useMockData`: JSON boolean, `true` when absent
//!
//! # Security
//! - The secret only leaves its `RedactedSecret` when encoded for persistence
//! - Credentials are never logged, only their id and secret length

use crate::error::StorageError;
use crate::storage::KeyValueStore;

use models::{Credentials, DataMode};

use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

pub const CREDENTIALS_KEY: &str = "einforma_credentials";
pub const DATA_MODE_KEY: &str = "useMockData";

#[derive(Serialize)]
struct PersistedCredentialsRef<'a> {
    #[serde(rename = "clientId")]
    client_id: &'a str,
    #[serde(rename = "clientSecret")]
    client_secret: &'a str,
}

#[derive(Deserialize)]
struct PersistedCredentials {
    #[serde(rename = "clientId")]
    client_id: String,
    #[serde(rename = "clientSecret")]
    client_secret: String,
}

/// Owns the active credential pair and the data-mode preference.
///
/// The active pair only changes after the backing store accepted the write.
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
    active: RwLock<Option<Credentials>>,
}

impl CredentialStore {
    /// Open the store and restore any persisted credentials.
    ///
    /// Malformed persisted credentials are discarded and removed from storage.
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let active = restore_credentials(store.as_ref());

        Self {
            store,
            active: RwLock::new(active),
        }
    }

    /// The active credentials, if any.
    pub fn get(&self) -> Option<Credentials> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Persist `credentials` and make them active.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store rejects the write; the previously
    /// active credentials stay in place. No retry is attempted.
    pub fn set(&self, credentials: Credentials) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&PersistedCredentialsRef {
            client_id: credentials.client_id(),
            client_secret: credentials.client_secret().as_str(),
        })
        .map_err(|e| StorageError::serialize(e.to_string()))?;

        self.store.set(CREDENTIALS_KEY, &encoded).inspect_err(|e| {
            warn!("Failed to store API credentials: {e}");
        })?;

        info!(
            "API credentials stored for client '{}' ({} char secret)",
            credentials.client_id(),
            credentials.client_secret().len()
        );

        *self.active.write().unwrap_or_else(PoisonError::into_inner) = Some(credentials);
        Ok(())
    }

    /// Forget the active credentials and remove them from storage.
    ///
    /// Idempotent: clearing when nothing is stored succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store rejects the removal; the active
    /// credentials stay in place.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(CREDENTIALS_KEY).inspect_err(|e| {
            warn!("Failed to remove API credentials: {e}");
        })?;
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = None;

        info!("API credentials cleared");
        Ok(())
    }

    /// The persisted data mode; [`DataMode::Simulated`] when unset or unreadable.
    pub fn data_mode(&self) -> DataMode {
        let stored = match self.store.get(DATA_MODE_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Could not read data mode preference, using simulated data: {e}");
                return DataMode::default();
            }
        };

        match stored.as_deref().map(serde_json::from_str::<bool>) {
            None => DataMode::default(),
            Some(Ok(use_mock_data)) => DataMode::from_use_mock_data(use_mock_data),
            Some(Err(e)) => {
                warn!("Ignoring malformed '{DATA_MODE_KEY}' value: {e}");
                DataMode::default()
            }
        }
    }

    pub fn use_simulated_data(&self) -> bool {
        self.data_mode().use_mock_data()
    }

    pub fn set_data_mode(&self, mode: DataMode) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&mode.use_mock_data())
            .map_err(|e| StorageError::serialize(e.to_string()))?;

        self.store.set(DATA_MODE_KEY, &encoded)?;

        info!("Data mode set to {mode}");
        Ok(())
    }
}

/// Read persisted credentials, removing the entry if it cannot be used.
fn restore_credentials(store: &dyn KeyValueStore) -> Option<Credentials> {
    let raw = match store.get(CREDENTIALS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No stored API credentials");
            return None;
        }
        Err(e) => {
            warn!("Could not read stored API credentials: {e}");
            return None;
        }
    };

    let restored = serde_json::from_str::<PersistedCredentials>(&raw)
        .map_err(|e| e.to_string())
        .and_then(|persisted| {
            Credentials::new(persisted.client_id, persisted.client_secret)
                .map_err(|e| e.to_string())
        });

    match restored {
        Ok(credentials) => {
            debug!("Restored API credentials for client '{}'", credentials.client_id());
            Some(credentials)
        }
        Err(reason) => {
            warn!("Discarding malformed stored API credentials: {reason}");
            if let Err(e) = store.remove(CREDENTIALS_KEY) {
                warn!("Failed to remove malformed API credentials: {e}");
            }
            None
        }
    }
}
