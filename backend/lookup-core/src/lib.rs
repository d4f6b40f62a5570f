pub mod config;
pub mod credential_store;
pub mod dispatcher;
pub mod error;
pub mod notify;
pub mod relay;
pub mod result_cache;
pub mod service;
pub mod storage;

#[cfg(test)]
mod tests;

pub use credential_store::CredentialStore;
pub use dispatcher::{DispatchOutcome, QueryDispatcher, ResultSource};
pub use notify::{Notification, NotificationLevel, Notifier, RecordingNotifier};
pub use relay::{RelayClient, RelayEndpoint, RelayRequest, RelayResponse, RelayTier};
pub use result_cache::ResultCache;
pub use service::LookupService;

pub const PROVIDER_HOST: &str = "api.einforma.com";
pub const PROVIDER_BASE_URL: &str =
    const_format::concatcp!("https://", PROVIDER_HOST, "/v1/companies");
pub const PRIMARY_RELAY_URL: &str = "https://corsproxy.io/";
pub const SECONDARY_RELAY_URL: &str = "https://api.allorigins.win/raw";
pub const SECONDARY_RELAY_TARGET_PARAM: &str = "url";
