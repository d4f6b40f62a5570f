//! Query dispatch: mode check, live request through the relays, simulated fallback.
//!
//! ```text
//! ModeCheck ──simulated──────────────────────────────▶ Simulate ──▶ Done
//!     │ live, no credentials ──▶ MissingCredentials (cache untouched)
//!     ▼ live
//! BuildRequest ──▶ Relay ──ok──▶ Done
//!                    └──failed──▶ Simulate (fallback) ──▶ Done
//! ```

pub mod simulated;
pub mod target;

pub use simulated::simulated_result;
pub use target::{ProviderTarget, classify_client_id};

use crate::config::AppConfig;
use crate::credential_store::CredentialStore;
use crate::error::{ConfigError, CoreError, DispatchError, LiveQueryError};
use crate::notify::{Notification, Notifier};
use crate::relay::{RelayClient, RelayRequest};
use crate::result_cache::ResultCache;

use common::ErrorLocation;
use models::{Credentials, DataMode, QueryParameters, QueryResult};

use std::fmt;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};
use url::Url;
use uuid::Uuid;

const FALLBACK_MESSAGE: &str = "Falling back to simulated data";

/// Where the data in a [`DispatchOutcome`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    Live,
    Simulated,
    /// Simulated data served because the live query failed.
    SimulatedFallback,
}

impl ResultSource {
    pub fn is_simulated(&self) -> bool {
        !matches!(self, ResultSource::Live)
    }
}

impl fmt::Display for ResultSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultSource::Live => write!(f, "live"),
            ResultSource::Simulated => write!(f, "simulated"),
            ResultSource::SimulatedFallback => write!(f, "simulated (fallback)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub dispatch_id: Uuid,
    pub source: ResultSource,
    pub result: QueryResult,
}

pub struct QueryDispatcher {
    preferences: Arc<CredentialStore>,
    relay: RelayClient,
    cache: Arc<ResultCache>,
    notifier: Arc<dyn Notifier>,
    provider_base_url: Url,
    simulated_latency: Duration,
}

impl QueryDispatcher {
    pub fn new(
        preferences: Arc<CredentialStore>,
        relay: RelayClient,
        cache: Arc<ResultCache>,
        notifier: Arc<dyn Notifier>,
        provider_base_url: Url,
        simulated_latency: Duration,
    ) -> Self {
        Self {
            preferences,
            relay,
            cache,
            notifier,
            provider_base_url,
            simulated_latency,
        }
    }

    /// Build a dispatcher from relay, provider and simulation settings.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] if a relay or the provider URL is unusable.
    pub fn from_config(
        config: &AppConfig,
        preferences: Arc<CredentialStore>,
        cache: Arc<ResultCache>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, CoreError> {
        let relay = RelayClient::from_config(&config.relays)?;

        let provider_base_url =
            Url::parse(&config.provider.base_url).map_err(|e| ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("provider.base_url: {e}"),
            })?;

        Ok(Self::new(
            preferences,
            relay,
            cache,
            notifier,
            provider_base_url,
            Duration::from_millis(config.simulation.latency_ms),
        ))
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    /// Run one query and publish its result to the cache.
    ///
    /// Live failures never surface as errors: they are notified and the
    /// simulated dataset is served instead.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MissingCredentials`] in live mode without
    /// credentials. The cache is left untouched in that case.
    pub async fn dispatch(
        &self,
        params: &QueryParameters,
        credentials: Option<&Credentials>,
    ) -> Result<DispatchOutcome, DispatchError> {
        let dispatch_id = Uuid::new_v4();
        let mode = self.preferences.data_mode();
        debug!("[{dispatch_id}] Mode check: {mode}, query {:?}", params.pairs());

        if mode == DataMode::Simulated {
            return Ok(self
                .simulate(dispatch_id, params, ResultSource::Simulated)
                .await);
        }

        let Some(credentials) = credentials else {
            let err = DispatchError::missing_credentials();
            warn!("[{dispatch_id}] Live query aborted: {err}");
            self.notifier.notify(Notification::error(
                "Please configure your API credentials before querying live data",
            ));
            return Err(err);
        };

        match self.query_live(dispatch_id, params, credentials).await {
            Ok(result) => {
                info!(
                    "[{dispatch_id}] Live query returned {} companies",
                    result.results.len()
                );
                self.cache.set(result.clone()).await;
                self.notifier
                    .notify(Notification::success("Data retrieved successfully"));

                Ok(DispatchOutcome {
                    dispatch_id,
                    source: ResultSource::Live,
                    result,
                })
            }
            Err(e) => {
                error!("[{dispatch_id}] Live query failed: {e}");
                self.notifier
                    .notify(Notification::error(format!("Error querying einforma API: {e}")));
                self.notifier.notify(Notification::info(FALLBACK_MESSAGE));

                Ok(self
                    .simulate(dispatch_id, params, ResultSource::SimulatedFallback)
                    .await)
            }
        }
    }

    async fn query_live(
        &self,
        dispatch_id: Uuid,
        params: &QueryParameters,
        credentials: &Credentials,
    ) -> Result<QueryResult, LiveQueryError> {
        let base = target::resolve_base_url(credentials.client_id(), &self.provider_base_url)?;
        let target_url = target::build_target_url(&base, params);
        let headers = target::live_request_headers(credentials)?;
        debug!("[{dispatch_id}] Built request GET {target_url}");

        let response = self
            .relay
            .relay(&target_url, &RelayRequest::get(headers))
            .await?;
        debug!(
            "[{dispatch_id}] Relay {} answered HTTP {}",
            response.tier, response.status
        );

        Ok(serde_json::from_str::<QueryResult>(&response.body)?)
    }

    async fn simulate(
        &self,
        dispatch_id: Uuid,
        params: &QueryParameters,
        source: ResultSource,
    ) -> DispatchOutcome {
        debug!(
            "[{dispatch_id}] Serving simulated data after {} ms",
            self.simulated_latency.as_millis()
        );
        tokio::time::sleep(self.simulated_latency).await;

        let result = simulated_result(params);
        self.cache.set(result.clone()).await;
        self.notifier
            .notify(Notification::success("Simulated data loaded"));
        info!("[{dispatch_id}] Dispatch completed with {source} data");

        DispatchOutcome {
            dispatch_id,
            source,
            result,
        }
    }
}
