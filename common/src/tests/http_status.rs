use crate::HttpStatusCode;

/// **VALUE**: Verifies the status classes used to describe relay failures.
///
/// **BUG THIS CATCHES**: Would catch off-by-one range bounds (e.g. 300 treated as success).
#[test]
fn given_status_codes_when_classified_then_ranges_are_exclusive() {
    assert!(HttpStatusCode(200).is_success());
    assert!(HttpStatusCode(299).is_success());
    assert!(!HttpStatusCode(300).is_success());

    assert!(HttpStatusCode(404).is_client_error());
    assert!(!HttpStatusCode(404).is_server_error());

    assert!(HttpStatusCode(503).is_server_error());
    assert!(HttpStatusCode(503).is_relay_refusal());
    assert!(!HttpStatusCode(500).is_relay_refusal());
}

#[test]
fn given_status_code_when_displayed_then_shows_number_only() {
    assert_eq!(HttpStatusCode::from(502).to_string(), "502");
}
