use crate::error::TransportError;

use url::Url;
use url::form_urlencoded::byte_serialize;

/// A cross-origin relay that re-issues a request to the URL it is given.
///
/// With a `target_param` the target travels as `?{param}={encoded}`; without
/// one the encoded target is the entire query string (`https://relay/?https%3A...`),
/// so such a relay URL must not carry a query of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayEndpoint {
    url: Url,
    target_param: Option<String>,
}

impl RelayEndpoint {
    pub fn new(url: Url, target_param: Option<String>) -> Self {
        Self { url, target_param }
    }

    #[track_caller]
    pub fn parse(url: &str, target_param: Option<&str>) -> Result<Self, TransportError> {
        let url = Url::parse(url)
            .map_err(|e| TransportError::setup(format!("Invalid relay URL '{url}': {e}")))?;

        if url.cannot_be_a_base() {
            return Err(TransportError::setup(format!(
                "Relay URL '{url}' cannot carry a query"
            )));
        }

        if target_param.is_none() && url.query().is_some() {
            return Err(TransportError::setup(format!(
                "Relay URL '{url}' has a query but no target parameter to append to it"
            )));
        }

        Ok(Self::new(url, target_param.map(str::to_string)))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The relay URL carrying `target` percent-encoded in its query.
    pub fn wrap(&self, target: &Url) -> Url {
        let mut wrapped = self.url.clone();

        match &self.target_param {
            Some(param) => {
                wrapped.query_pairs_mut().append_pair(param, target.as_str());
            }
            None => {
                let encoded: String = byte_serialize(target.as_str().as_bytes()).collect();
                wrapped.set_query(Some(&encoded));
            }
        }

        wrapped
    }
}
