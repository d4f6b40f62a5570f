//! Transport fallback through cross-origin relays.
//!
//! A request goes out through the primary relay with the caller's headers.
//! If that fails for any reason, exactly one more attempt goes through the
//! secondary relay with the headers replaced by [`fallback_headers`]; the
//! secondary relay is never trusted with the caller's authorization.

pub mod endpoint;

pub use endpoint::RelayEndpoint;

use crate::config::RelayConfig;
use crate::error::TransportError;

use common::HttpStatusCode;

use std::fmt;
use std::time::Duration;

use log::{debug, info, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayTier {
    Primary,
    Secondary,
}

impl fmt::Display for RelayTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayTier::Primary => write!(f, "primary"),
            RelayTier::Secondary => write!(f, "secondary"),
        }
    }
}

/// Method and headers the caller wants delivered to the target.
#[derive(Debug, Clone)]
pub struct RelayRequest {
    pub method: Method,
    pub headers: HeaderMap,
}

impl RelayRequest {
    pub fn get(headers: HeaderMap) -> Self {
        Self {
            method: Method::GET,
            headers,
        }
    }
}

/// A successful relay delivery.
#[derive(Debug, Clone)]
pub struct RelayResponse {
    pub tier: RelayTier,
    pub status: HttpStatusCode,
    pub body: String,
}

/// The fixed header set sent to the secondary relay.
pub fn fallback_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers
}

#[derive(Clone)]
pub struct RelayClient {
    client: Client,
    primary: RelayEndpoint,
    secondary: RelayEndpoint,
}

impl RelayClient {
    /// Build a relay client.
    ///
    /// `timeout` of `None` leaves the transport default in place.
    pub fn new(
        primary: RelayEndpoint,
        secondary: RelayEndpoint,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::setup(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            primary,
            secondary,
        })
    }

    pub fn from_config(config: &RelayConfig) -> Result<Self, TransportError> {
        let primary =
            RelayEndpoint::parse(&config.primary.url, config.primary.target_param.as_deref())?;
        let secondary = RelayEndpoint::parse(
            &config.secondary.url,
            config.secondary.target_param.as_deref(),
        )?;

        Self::new(
            primary,
            secondary,
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    /// Deliver `request` to `target` through the primary relay, falling back to the secondary.
    ///
    /// # Errors
    ///
    /// Returns the secondary relay's [`TransportError`] when both attempts fail.
    /// The primary failure is only logged.
    pub async fn relay(
        &self,
        target: &Url,
        request: &RelayRequest,
    ) -> Result<RelayResponse, TransportError> {
        match self
            .attempt(
                RelayTier::Primary,
                &self.primary,
                target,
                request.method.clone(),
                request.headers.clone(),
            )
            .await
        {
            Ok(response) => return Ok(response),
            Err(e) => warn!(
                "Primary relay failed ({}), retrying through secondary relay: {e}",
                e.error_category()
            ),
        }

        self.attempt(
            RelayTier::Secondary,
            &self.secondary,
            target,
            request.method.clone(),
            fallback_headers(),
        )
        .await
        .inspect_err(|e| warn!("Secondary relay failed ({}): {e}", e.error_category()))
    }

    async fn attempt(
        &self,
        tier: RelayTier,
        endpoint: &RelayEndpoint,
        target: &Url,
        method: Method,
        headers: HeaderMap,
    ) -> Result<RelayResponse, TransportError> {
        let url = endpoint.wrap(target);
        debug!("Relaying {method} {target} through {tier} relay {}", endpoint.url());

        let response = self
            .client
            .request(method, url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(tier, &e))?;

        let status = HttpStatusCode(response.status().as_u16());
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::from_http_response(tier, status.0, body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(tier, &e))?;

        info!("Relay {tier} delivered HTTP {status} ({} bytes)", body.len());
        Ok(RelayResponse { tier, status, body })
    }
}
