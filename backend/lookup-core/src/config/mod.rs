use crate::error::config::ConfigError;
use crate::storage::DEFAULT_QUOTA_BYTES;
use crate::{
    PRIMARY_RELAY_URL, PROVIDER_BASE_URL, SECONDARY_RELAY_TARGET_PARAM, SECONDARY_RELAY_URL,
};

use common::ErrorLocation;

use std::env;
use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use url::Url;

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_VERSION: u32 = 1;
const DATA_DIR_NAME: &str = "einforma";

pub const ENV_PRIMARY_RELAY_URL: &str = "EINFORMA_PRIMARY_RELAY_URL";
pub const ENV_SECONDARY_RELAY_URL: &str = "EINFORMA_SECONDARY_RELAY_URL";
pub const ENV_PROVIDER_URL: &str = "EINFORMA_PROVIDER_URL";
pub const ENV_SIMULATED_LATENCY_MS: &str = "EINFORMA_SIMULATED_LATENCY_MS";

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayEndpointConfig {
    pub url: String,
    #[serde(default)]
    pub target_param: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_primary_relay")]
    pub primary: RelayEndpointConfig,
    #[serde(default = "default_secondary_relay")]
    pub secondary: RelayEndpointConfig,
    /// `None` keeps the transport default (no explicit timeout).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            primary: default_primary_relay(),
            secondary: default_secondary_relay(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Endpoint used when the client id is neither a URL nor a host name.
    #[serde(default = "default_provider_base_url")]
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            quota_bytes: default_quota_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub relays: RelayConfig,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            relays: RelayConfig::default(),
            provider: ProviderConfig::default(),
            simulation: SimulationConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_primary_relay() -> RelayEndpointConfig {
    RelayEndpointConfig {
        url: PRIMARY_RELAY_URL.to_string(),
        target_param: None,
    }
}
fn default_secondary_relay() -> RelayEndpointConfig {
    RelayEndpointConfig {
        url: SECONDARY_RELAY_URL.to_string(),
        target_param: Some(SECONDARY_RELAY_TARGET_PARAM.to_string()),
    }
}
fn default_provider_base_url() -> String {
    PROVIDER_BASE_URL.to_string()
}
fn default_latency_ms() -> u64 {
    1500
}
fn default_quota_bytes() -> usize {
    DEFAULT_QUOTA_BYTES
}

// ============================================
// IMPLEMENTATION
// ============================================

impl AppConfig {
    /// Load config from {config_dir}/config.json.
    ///
    /// # Returns
    ///
    /// Returns `Ok(AppConfig)` if loaded successfully or defaults if file missing.
    /// Returns `Err(ConfigError)` if file exists but is corrupted/invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: AppConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config JSON: {}", e);
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Save config to {config_dir}/config.json using atomic write.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if validation, directory creation, serialization,
    /// the write or the rename fails.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{}.tmp", CONFIG_FILE_NAME));

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, json).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        // Atomic rename (POSIX guarantees atomicity)
        std::fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Apply `EINFORMA_*` environment overrides, then re-validate.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(url) = env::var(ENV_PRIMARY_RELAY_URL) {
            debug!("Primary relay overridden by {ENV_PRIMARY_RELAY_URL}");
            self.relays.primary.url = url;
        }

        if let Ok(url) = env::var(ENV_SECONDARY_RELAY_URL) {
            debug!("Secondary relay overridden by {ENV_SECONDARY_RELAY_URL}");
            self.relays.secondary.url = url;
        }

        if let Ok(url) = env::var(ENV_PROVIDER_URL) {
            debug!("Provider URL overridden by {ENV_PROVIDER_URL}");
            self.provider.base_url = url;
        }

        if let Ok(raw) = env::var(ENV_SIMULATED_LATENCY_MS) {
            self.simulation.latency_ms =
                raw.trim().parse().map_err(|e| ConfigError::EnvOverride {
                    location: ErrorLocation::from(Location::caller()),
                    variable: ENV_SIMULATED_LATENCY_MS.to_string(),
                    reason: format!("'{raw}' is not a millisecond count: {e}"),
                })?;
        }

        self.validate()
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid version: {} (expected 1-{})",
                    self.version, CONFIG_VERSION
                ),
            });
        }

        validate_http_url("relays.primary.url", &self.relays.primary.url)?;
        validate_http_url("relays.secondary.url", &self.relays.secondary.url)?;
        validate_http_url("provider.base_url", &self.provider.base_url)?;

        for (field, relay) in [
            ("relays.primary", &self.relays.primary),
            ("relays.secondary", &self.relays.secondary),
        ] {
            if relay.target_param.as_deref().is_some_and(|p| p.trim().is_empty()) {
                return Err(ConfigError::ValidationError {
                    location: ErrorLocation::from(Location::caller()),
                    reason: format!("{field}.target_param cannot be empty string"),
                });
            }
        }

        if self.relays.request_timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "relays.request_timeout_secs must be positive when set".to_string(),
            });
        }

        if self.storage.quota_bytes == 0 {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "storage.quota_bytes must be positive".to_string(),
            });
        }

        Ok(())
    }
}

#[track_caller]
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let parsed = Url::parse(value).map_err(|e| ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: format!("{field}: invalid URL '{value}': {e}"),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("{field}: expected http(s) URL, got '{value}'"),
        });
    }

    Ok(())
}

/// Platform data directory for storage, config and logs (e.g. `~/.local/share/einforma`).
pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_local_dir()
        .map(|dir| dir.join(DATA_DIR_NAME))
        .ok_or_else(|| ConfigError::DataDirectory {
            location: ErrorLocation::from(Location::caller()),
            reason: "Cannot determine platform data directory; pass --data-dir".to_string(),
        })
}
