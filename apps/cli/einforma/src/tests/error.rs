// Unit tests for error module
// Tests conversions and the JSON form printed by `search --json`

use crate::error::AppError;

use lookup_core::error::{DispatchError, StorageError};
use models::Credentials;

/// **VALUE**: Tests that errors serialize with a variant tag.
///
/// **WHY THIS MATTERS**: Scripts using `--json` branch on the error type.
///
/// **BUG THIS CATCHES**: Would catch removing `#[derive(Serialize)]` or the `type` tag.
#[test]
fn given_app_error_when_serialized_then_tagged_json() {
    // GIVEN: An AppError
    let err = AppError::app("Test");

    // WHEN: Serializing to JSON
    let json = serde_json::to_value(&err).unwrap();

    // THEN: Tag, message and location
    assert_eq!(json["type"], "App");
    assert_eq!(json["data"]["message"], "Test");
    assert!(json["data"]["location"]["file"].as_str().unwrap().ends_with("error.rs"));
}

/// **VALUE**: Verifies MissingCredentials keeps its own variant and original location.
///
/// **WHY THIS MATTERS**: Users need to know to run `einforma credentials set`, not that
/// something generic failed in the core.
///
/// **BUG THIS CATCHES**: Would catch collapsing dispatch errors into `Core`.
#[test]
fn given_dispatch_error_when_converted_then_missing_credentials_variant() {
    // GIVEN: A dispatch error
    let dispatch_err = DispatchError::missing_credentials();
    let original = dispatch_err.to_string();

    // WHEN: Converting
    let err = AppError::from(dispatch_err);

    // THEN: Same variant, same text
    assert!(matches!(err, AppError::MissingCredentials { .. }));
    assert_eq!(err.to_string(), original);
}

/// **VALUE**: Verifies form and storage errors map to Input and Core.
///
/// **WHY THIS MATTERS**: Input errors are the user's to fix; Core errors point at the
/// environment.
///
/// **BUG THIS CATCHES**: Would catch a swapped mapping.
#[test]
fn given_model_and_storage_errors_when_converted_then_input_and_core() {
    // GIVEN: A validation error and a storage error
    let model_err = Credentials::new("", "secret").unwrap_err();
    let storage_err = StorageError::quota_exceeded("k", 2, 1);

    // WHEN: Converting
    let input = AppError::from(model_err);
    let core = AppError::from(storage_err);

    // THEN: Expected variants carrying the source text
    assert!(matches!(input, AppError::Input { ref message, .. } if message.contains("Client ID cannot be empty")));
    assert!(matches!(core, AppError::Core { .. }));
}
