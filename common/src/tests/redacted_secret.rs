use crate::RedactedSecret;

/// **VALUE**: Verifies that Debug and Display never reveal the secret.
///
/// **WHY THIS MATTERS**: Credentials are logged with `{:?}` in several places. A leaking
/// Debug impl would write the client secret into `einforma.log`.
///
/// **BUG THIS CATCHES**: Would catch if someone replaces the manual impls with derives.
#[test]
fn given_secret_when_formatted_then_value_is_redacted() {
    // GIVEN: A secret
    let secret = RedactedSecret::from("super-secret-value");

    // WHEN: Formatting with Debug and Display
    let debug = format!("{:?}", secret);
    let display = format!("{}", secret);

    // THEN: Neither contains the value
    assert!(!debug.contains("super-secret-value"));
    assert!(!display.contains("super-secret-value"));
    assert!(debug.contains("REDACTED"));
    assert_eq!(secret.len(), "super-secret-value".len());
}

/// **VALUE**: Verifies that implicit serialization is refused.
///
/// **WHY THIS MATTERS**: Persisting credentials must go through `as_str()` explicitly so a
/// struct containing a secret cannot be dumped to JSON by accident.
///
/// **BUG THIS CATCHES**: Would catch if the Serialize impl starts emitting the value.
#[test]
fn given_secret_when_serialized_then_returns_error() {
    // GIVEN: A secret
    let secret = RedactedSecret::from("abc");

    // WHEN: Serializing directly
    let result = serde_json::to_string(&secret);

    // THEN: Serialization fails with the redaction message
    let err = result.expect_err("serialization must fail");
    assert!(err.to_string().contains("cannot be serialized"));
}

#[test]
fn given_two_secrets_with_same_value_when_compared_then_equal() {
    assert_eq!(RedactedSecret::from("x"), RedactedSecret::from("x"));
    assert_ne!(RedactedSecret::from("x"), RedactedSecret::from("y"));
    assert!(RedactedSecret::from("").is_empty());
}
