use crate::helpers::{
    PRIMARY_PATH, SECONDARY_PATH, TARGET_PARAM, UNREACHABLE_RELAY, mock_relays, relays,
};

use lookup_core::{RelayRequest, RelayTier};

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TARGET: &str = "https://api.einforma.com/v1/companies?q=Acme";

fn target() -> Url {
    Url::parse(TARGET).unwrap()
}

fn authorized_request() -> RelayRequest {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dGVzdDp0ZXN0"));
    headers.insert("x-trace", HeaderValue::from_static("caller-header"));
    RelayRequest::get(headers)
}

/// **VALUE**: Verifies a healthy primary relay is used alone with the caller's headers.
///
/// **WHY THIS MATTERS**: The secondary relay is a last resort and must not see traffic
/// when the primary works.
///
/// **BUG THIS CATCHES**: Would catch always calling both relays or stripping caller headers
/// from the primary attempt.
#[tokio::test]
async fn given_primary_succeeds_when_relaying_then_secondary_never_called() {
    // GIVEN: A primary that answers and a secondary that must not be hit
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRIMARY_PATH))
        .and(query_param(TARGET_PARAM, TARGET))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"results":[]}"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path(SECONDARY_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    // WHEN: Relaying
    let response = mock_relays(&server)
        .relay(&target(), &authorized_request())
        .await
        .unwrap();

    // THEN: Primary tier, body delivered, caller headers forwarded
    assert_eq!(response.tier, RelayTier::Primary);
    assert_eq!(response.status.0, 200);
    assert_eq!(response.body, r#"{"results":[]}"#);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].headers.get("authorization").unwrap(), "Basic dGVzdDp0ZXN0");
    assert_eq!(requests[0].headers.get("x-trace").unwrap(), "caller-header");
}

/// **VALUE**: Verifies exactly one secondary attempt with exactly the two fixed headers.
///
/// **WHY THIS MATTERS**: The secondary relay is an untrusted third party. Forwarding the
/// Authorization header would leak the provider credentials.
///
/// **BUG THIS CATCHES**: Would catch reusing the caller's headers on fallback, retrying the
/// secondary, or encoding the target differently for the second attempt.
#[tokio::test]
async fn given_primary_refuses_when_relaying_then_one_secondary_attempt_without_auth() {
    // GIVEN: A primary that refuses and a secondary that answers
    let server = MockServer::start().await;
    Mock::given(path(PRIMARY_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SECONDARY_PATH))
        .and(query_param(TARGET_PARAM, TARGET))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Relaying
    let response = mock_relays(&server)
        .relay(&target(), &authorized_request())
        .await
        .unwrap();

    // THEN: Secondary tier, and its request carried only the JSON headers
    assert_eq!(response.tier, RelayTier::Secondary);

    let requests = server.received_requests().await.unwrap();
    let secondary: Vec<_> = requests
        .iter()
        .filter(|r| r.url.path() == SECONDARY_PATH)
        .collect();
    assert_eq!(secondary.len(), 1, "Exactly one secondary attempt");

    let headers = &secondary[0].headers;
    assert!(headers.get("authorization").is_none());
    assert!(headers.get("x-trace").is_none());
    assert_eq!(headers.get("content-type").unwrap(), "application/json");
    assert_eq!(headers.get("accept").unwrap(), "application/json");
}

/// **VALUE**: Verifies that a network failure on the primary also triggers the fallback.
///
/// **WHY THIS MATTERS**: Public relays go offline; an unreachable host is as common as a
/// refusal.
///
/// **BUG THIS CATCHES**: Would catch only falling back on HTTP status errors.
#[tokio::test]
async fn given_unreachable_primary_when_relaying_then_secondary_delivers() {
    // GIVEN: No primary relay, a working secondary
    let server = MockServer::start().await;
    Mock::given(path(SECONDARY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;
    let client = relays(UNREACHABLE_RELAY, &format!("{}{SECONDARY_PATH}", server.uri()));

    // WHEN: Relaying
    let response = client.relay(&target(), &authorized_request()).await.unwrap();

    // THEN: Delivered by the secondary
    assert_eq!(response.tier, RelayTier::Secondary);
    assert_eq!(response.body, "ok");
}

/// **VALUE**: Verifies that the reported failure is the secondary relay's.
///
/// **WHY THIS MATTERS**: The caller sees the last thing that went wrong; the primary
/// failure only goes to the log.
///
/// **BUG THIS CATCHES**: Would catch returning the primary error after both attempts failed.
#[tokio::test]
async fn given_both_relays_fail_when_relaying_then_secondary_error_returned() {
    // GIVEN: Both relays failing with different statuses
    let server = MockServer::start().await;
    Mock::given(path(PRIMARY_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path(SECONDARY_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Relaying
    let err = mock_relays(&server)
        .relay(&target(), &authorized_request())
        .await
        .unwrap_err();

    // THEN: Secondary relay, its status and body
    assert_eq!(err.relay(), Some(RelayTier::Secondary));
    assert_eq!(err.status_code(), Some(502));
    assert_eq!(err.error_category(), "relay_refused");
    assert!(err.to_string().contains("bad gateway"));
}
