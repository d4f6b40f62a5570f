//! Wiring of storage, preferences, cache and dispatcher for one data directory.

use crate::config::AppConfig;
use crate::credential_store::CredentialStore;
use crate::dispatcher::QueryDispatcher;
use crate::error::CoreError;
use crate::notify::Notifier;
use crate::result_cache::ResultCache;
use crate::storage::{FileKeyValueStore, KeyValueStore};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;

pub struct LookupService {
    data_dir: PathBuf,
    config: AppConfig,
    preferences: Arc<CredentialStore>,
    cache: Arc<ResultCache>,
    dispatcher: QueryDispatcher,
}

impl LookupService {
    /// Open the service rooted at `data_dir`.
    ///
    /// Loads `config.json` (defaults when missing), applies `EINFORMA_*`
    /// environment overrides and restores the persisted credentials.
    pub fn open(data_dir: &Path, notifier: Arc<dyn Notifier>) -> Result<Self, CoreError> {
        let mut config = AppConfig::load(data_dir)?;
        config.apply_env_overrides()?;

        let store: Arc<dyn KeyValueStore> = Arc::new(
            FileKeyValueStore::open(data_dir).with_quota(Some(config.storage.quota_bytes)),
        );

        Self::with_store(data_dir, config, store, notifier)
    }

    /// Build the service over an explicit store, skipping config discovery.
    pub fn with_store(
        data_dir: &Path,
        config: AppConfig,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, CoreError> {
        let preferences = Arc::new(CredentialStore::open(store));
        let cache = Arc::new(ResultCache::new());
        let dispatcher =
            QueryDispatcher::from_config(&config, preferences.clone(), cache.clone(), notifier)?;

        info!("Lookup service ready in {}", data_dir.display());

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            config,
            preferences,
            cache,
            dispatcher,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn preferences(&self) -> &CredentialStore {
        &self.preferences
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn dispatcher(&self) -> &QueryDispatcher {
        &self.dispatcher
    }
}
