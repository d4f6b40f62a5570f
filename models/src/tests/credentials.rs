use crate::{Credentials, ModelError};

/// **VALUE**: Verifies that blank client ids are rejected at construction.
///
/// **WHY THIS MATTERS**: A blank id produces an `Authorization` header of `Basic Og==`-style
/// garbage and a nonsense provider URL. The form boundary must stop it.
///
/// **BUG THIS CATCHES**: Would catch if trimming or the empty check is removed.
#[test]
fn given_blank_client_id_when_creating_credentials_then_returns_validation_error() {
    // GIVEN / WHEN: Whitespace-only client id
    let result = Credentials::new("   ", "secret");

    // THEN: Validation error naming the field
    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Client ID cannot be empty");
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[test]
fn given_blank_secret_when_creating_credentials_then_returns_validation_error() {
    let result = Credentials::new("client", "  ");

    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Client secret cannot be empty");
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

/// **VALUE**: Verifies that Debug output of credentials never contains the secret.
///
/// **BUG THIS CATCHES**: Would catch if `client_secret` is changed back to a plain String.
#[test]
fn given_credentials_when_debug_formatted_then_secret_is_hidden() {
    // GIVEN: Valid credentials
    let credentials = Credentials::new(" api.einforma.com ", "hunter2").unwrap();

    // WHEN: Formatting with Debug
    let debug = format!("{credentials:?}");

    // THEN: Id is visible and trimmed, secret is not
    assert_eq!(credentials.client_id(), "api.einforma.com");
    assert!(debug.contains("api.einforma.com"));
    assert!(!debug.contains("hunter2"));
    assert_eq!(credentials.client_secret().as_str(), "hunter2");
}
