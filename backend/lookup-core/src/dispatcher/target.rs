//! Where a live query goes and what it carries.

use crate::error::LiveQueryError;

use common::ErrorLocation;
use models::{Credentials, QueryParameters};

use std::panic::Location;
use std::sync::OnceLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use regex::Regex;
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json";

// Dotted DNS labels ending in an alphabetic TLD, optional port and path.
const HOST_PATTERN: &str = r"^(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}(?::\d{1,5})?(?:/\S*)?$";

static HOST_REGEX: OnceLock<Regex> = OnceLock::new();

pub(crate) fn host_regex() -> &'static Regex {
    HOST_REGEX.get_or_init(|| Regex::new(HOST_PATTERN).expect("valid host pattern"))
}

/// How a client identifier maps onto the provider endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderTarget {
    /// Absolute `http(s)` URL, used verbatim.
    Url(Url),
    /// Host name (optionally with port and path), reached over HTTPS.
    Host(String),
    /// Plain client id; the configured provider endpoint is used.
    Opaque,
}

pub fn classify_client_id(client_id: &str) -> ProviderTarget {
    let candidate = client_id.trim();

    if let Ok(url) = Url::parse(candidate)
        && matches!(url.scheme(), "http" | "https")
        && url.has_host()
    {
        return ProviderTarget::Url(url);
    }

    if host_regex().is_match(candidate) {
        return ProviderTarget::Host(candidate.to_string());
    }

    ProviderTarget::Opaque
}

/// Base URL of the provider for `client_id`.
#[track_caller]
pub fn resolve_base_url(client_id: &str, provider_base_url: &Url) -> Result<Url, LiveQueryError> {
    match classify_client_id(client_id) {
        ProviderTarget::Url(url) => Ok(url),
        ProviderTarget::Host(host) => Ok(Url::parse(&format!("https://{host}"))?),
        ProviderTarget::Opaque => Ok(provider_base_url.clone()),
    }
}

/// `base` with every non-empty parameter appended in fixed order.
pub fn build_target_url(base: &Url, params: &QueryParameters) -> Url {
    let mut target = base.clone();
    let pairs = params.pairs();

    if !pairs.is_empty() {
        target.query_pairs_mut().extend_pairs(pairs);
    }

    target
}

pub fn basic_auth_value(credentials: &Credentials) -> String {
    let raw = format!(
        "{}:{}",
        credentials.client_id(),
        credentials.client_secret().as_str()
    );
    format!("Basic {}", STANDARD.encode(raw))
}

/// Authorization plus JSON content negotiation headers for the provider.
#[track_caller]
pub fn live_request_headers(credentials: &Credentials) -> Result<HeaderMap, LiveQueryError> {
    let mut authorization =
        HeaderValue::from_str(&basic_auth_value(credentials)).map_err(|e| {
            LiveQueryError::Target {
                message: format!("Credentials cannot be sent as a header: {e}"),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
    Ok(headers)
}
