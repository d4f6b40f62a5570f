//! Shared fixtures for lookup-core integration tests.

use lookup_core::storage::{KeyValueStore, MemoryKeyValueStore};
use lookup_core::{
    CredentialStore, QueryDispatcher, RecordingNotifier, RelayClient, RelayEndpoint, ResultCache,
};

use models::{Credentials, QueryParameters};

use std::sync::Arc;
use std::time::Duration;

use url::Url;
use wiremock::MockServer;

/// Nothing listens on port 1; connections are refused immediately.
pub const UNREACHABLE_RELAY: &str = "http://127.0.0.1:1/";
pub const PRIMARY_PATH: &str = "/primary";
pub const SECONDARY_PATH: &str = "/secondary";
pub const TARGET_PARAM: &str = "url";
pub const TEST_LATENCY: Duration = Duration::from_millis(50);
pub const PROVIDER_URL: &str = "https://api.einforma.com/v1/companies";

/// Relay client whose primary and secondary relays both point at `server`.
pub fn mock_relays(server: &MockServer) -> RelayClient {
    relays(
        &format!("{}{PRIMARY_PATH}", server.uri()),
        &format!("{}{SECONDARY_PATH}", server.uri()),
    )
}

pub fn relays(primary: &str, secondary: &str) -> RelayClient {
    RelayClient::new(
        RelayEndpoint::parse(primary, Some(TARGET_PARAM)).unwrap(),
        RelayEndpoint::parse(secondary, Some(TARGET_PARAM)).unwrap(),
        Some(Duration::from_secs(5)),
    )
    .unwrap()
}

pub struct Harness {
    pub store: Arc<MemoryKeyValueStore>,
    pub preferences: Arc<CredentialStore>,
    pub cache: Arc<ResultCache>,
    pub notifier: Arc<RecordingNotifier>,
    pub dispatcher: QueryDispatcher,
}

pub fn harness(relay: RelayClient) -> Harness {
    let store = Arc::new(MemoryKeyValueStore::new());
    let preferences = Arc::new(CredentialStore::open(
        store.clone() as Arc<dyn KeyValueStore>
    ));
    let cache = Arc::new(ResultCache::new());
    let notifier = Arc::new(RecordingNotifier::new());

    let dispatcher = QueryDispatcher::new(
        preferences.clone(),
        relay,
        cache.clone(),
        notifier.clone(),
        Url::parse(PROVIDER_URL).unwrap(),
        TEST_LATENCY,
    );

    Harness {
        store,
        preferences,
        cache,
        notifier,
        dispatcher,
    }
}

pub fn search(term: &str) -> QueryParameters {
    QueryParameters {
        q: Some(term.to_string()),
        ..Default::default()
    }
}

pub fn test_credentials() -> Credentials {
    Credentials::new("test-client", "test-secret").unwrap()
}
