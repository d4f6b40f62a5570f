use lookup_core::RelayTier;
use lookup_core::error::{ConfigError, CoreError, DispatchError, StorageError, TransportError};

use common::ErrorLocation;

use std::panic::Location;
use std::path::PathBuf;

/// **VALUE**: Verifies that dispatch errors carry the call site.
///
/// **WHY THIS MATTERS**: MissingCredentials is raised from one place but reported by the CLI;
/// the location points back at the dispatcher.
///
/// **BUG THIS CATCHES**: Would catch `missing_credentials()` losing `#[track_caller]`.
#[test]
fn given_missing_credentials_error_when_formatted_then_includes_message_and_location() {
    // GIVEN: The constructor called here
    let err = DispatchError::missing_credentials();

    // WHEN: Formatting
    let error_string = err.to_string();

    // THEN: Type, message and this file
    assert!(error_string.contains("Missing Credentials Error"));
    assert!(error_string.contains("requires stored API credentials"));
    assert!(error_string.contains("error.rs"));
}

/// **VALUE**: Verifies transport errors name the relay and the status.
///
/// **WHY THIS MATTERS**: The fallback notice shows this text to the user.
///
/// **BUG THIS CATCHES**: Would catch dropping the relay tier from the message.
#[test]
fn given_transport_status_error_when_formatted_then_names_relay_and_status() {
    // GIVEN: A secondary relay refusal
    let err = TransportError::from_http_response(RelayTier::Secondary, 429, "slow down");

    // WHEN: Formatting
    let error_string = err.to_string();

    // THEN: Relay, status, body and location
    assert!(error_string.contains("'secondary'"));
    assert!(error_string.contains("429"));
    assert!(error_string.contains("slow down"));
    assert!(error_string.contains("error.rs"));
    assert_eq!(err.error_category(), "relay_refused");
}

/// **VALUE**: Verifies quota errors report the figures needed to act on them.
///
/// **WHY THIS MATTERS**: "storage full" alone does not tell the user what to delete.
///
/// **BUG THIS CATCHES**: Would catch a Display that omits the key or sizes.
#[test]
fn given_quota_error_when_formatted_then_includes_key_and_sizes() {
    // GIVEN: A quota error
    let err = StorageError::quota_exceeded("einforma_credentials", 120, 100);

    // WHEN: Formatting
    let error_string = err.to_string();

    // THEN: Key and sizes present
    assert!(error_string.contains("einforma_credentials"));
    assert!(error_string.contains("120"));
    assert!(error_string.contains("100"));
}

/// **VALUE**: Verifies that `CoreError` is transparent over its sources.
///
/// **WHY THIS MATTERS**: The CLI prints `CoreError` directly; wrapping text would hide the
/// original location.
///
/// **BUG THIS CATCHES**: Would catch replacing `#[error(transparent)]` with a generic message.
#[test]
#[track_caller]
fn given_config_error_when_wrapped_in_core_error_then_display_unchanged() {
    // GIVEN: A config error
    let config_err = ConfigError::ReadError {
        location: ErrorLocation::from(Location::caller()),
        path: PathBuf::from("/tmp/einforma/config.json"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    let expected = config_err.to_string();

    // WHEN: Converting to CoreError
    let core_err = CoreError::from(config_err);

    // THEN: Same text
    assert_eq!(core_err.to_string(), expected);
    assert!(expected.contains("config.json"));
}
