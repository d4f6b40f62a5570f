// Unit tests for provider target resolution
// Dispatcher behaviour over HTTP is covered in integration_tests/dispatcher.rs

use crate::PROVIDER_BASE_URL;
use crate::dispatcher::target::{
    ProviderTarget, basic_auth_value, build_target_url, classify_client_id, host_regex,
    live_request_headers, resolve_base_url,
};

use models::{Credentials, QueryParameters};

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use url::Url;

fn provider_url() -> Url {
    Url::parse(PROVIDER_BASE_URL).unwrap()
}

/// **VALUE**: Verifies that a search with only a term sends `q` and nothing else.
///
/// **WHY THIS MATTERS**: The provider treats `type=` with an empty value as a filter
/// that matches nothing, so blank form fields must never reach the query string.
///
/// **BUG THIS CATCHES**: Would catch appending every key regardless of value, which
/// produces `?q=Acme&type=&location=&sector=`.
#[test]
fn given_only_search_term_when_target_built_then_query_is_q_only() {
    // GIVEN: Parameters with a term and blank filters
    let params = QueryParameters {
        q: Some("Acme".to_string()),
        kind: Some(String::new()),
        location: Some(String::new()),
        sector: None,
    };

    // WHEN: Building the target URL
    let target = build_target_url(&provider_url(), &params);

    // THEN: Only q is present
    assert_eq!(target.query(), Some("q=Acme"));
}

/// **VALUE**: Verifies that parameters are appended in the fixed `q`, `type`, `location`, `sector` order.
///
/// **WHY THIS MATTERS**: Relays and provider logs are compared by URL; an unstable order
/// makes identical queries look different.
///
/// **BUG THIS CATCHES**: Would catch iterating a hash map instead of the fixed key list.
#[test]
fn given_all_parameters_when_target_built_then_order_is_fixed() {
    // GIVEN: Every parameter filled in
    let params = QueryParameters {
        q: Some("Acme Ibérica".to_string()),
        kind: Some("company".to_string()),
        location: Some("Madrid".to_string()),
        sector: Some("software".to_string()),
    };

    // WHEN: Building the target URL
    let target = build_target_url(&provider_url(), &params);

    // THEN: Keys appear in fixed order and values are form-encoded
    assert_eq!(
        target.query(),
        Some("q=Acme+Ib%C3%A9rica&type=company&location=Madrid&sector=software")
    );
}

/// **VALUE**: Verifies that an empty parameter set leaves the base URL untouched.
///
/// **WHY THIS MATTERS**: A dangling `?` changes the URL the relay forwards.
///
/// **BUG THIS CATCHES**: Would catch calling `query_pairs_mut()` unconditionally.
#[test]
fn given_no_parameters_when_target_built_then_base_url_unchanged() {
    // GIVEN: No parameters
    let params = QueryParameters::default();

    // WHEN: Building the target URL
    let target = build_target_url(&provider_url(), &params);

    // THEN: Identical to the base
    assert_eq!(target.as_str(), PROVIDER_BASE_URL);
}

/// **VALUE**: Verifies the three classifications of a client identifier.
///
/// **WHY THIS MATTERS**: The identifier decides where credentials are sent. An opaque
/// OAuth client id must go to the configured provider, never to `https://{client id}`.
///
/// **BUG THIS CATCHES**: Would catch a heuristic that treats any string as a host name.
#[test]
fn given_client_ids_when_classified_then_url_host_or_opaque() {
    // GIVEN / WHEN / THEN: One case per classification
    assert_eq!(
        classify_client_id("https://sandbox.einforma.com/api"),
        ProviderTarget::Url(Url::parse("https://sandbox.einforma.com/api").unwrap())
    );
    assert_eq!(
        classify_client_id("api.einforma.com/v1/companies"),
        ProviderTarget::Host("api.einforma.com/v1/companies".to_string())
    );
    assert_eq!(
        classify_client_id("  api.einforma.com:8443  "),
        ProviderTarget::Host("api.einforma.com:8443".to_string())
    );
    assert_eq!(classify_client_id("a1b2c3d4e5"), ProviderTarget::Opaque);
    assert_eq!(classify_client_id("client id with spaces"), ProviderTarget::Opaque);
    assert_eq!(classify_client_id("ftp://files.einforma.com"), ProviderTarget::Opaque);
}

/// **VALUE**: Tests that the host pattern rejects strings that only look host-like.
///
/// **WHY THIS MATTERS**: A loose pattern would send Basic credentials to arbitrary
/// hosts derived from typos.
///
/// **BUG THIS CATCHES**: Would catch dropping the TLD requirement or the label rules.
#[test]
fn given_non_hosts_when_host_regex_applied_then_does_not_match() {
    // GIVEN: Strings that are not DNS host names
    let re = host_regex();
    let invalid_cases = vec![
        "localhost",        // no dot
        "client_id.value",  // underscore
        "-bad.example.com", // leading hyphen
        "example.c0m",      // numeric TLD
        "",
    ];

    // WHEN / THEN: None of them match
    for invalid in invalid_cases {
        assert!(!re.is_match(invalid), "Regex should not match: {invalid}");
    }
}

/// **VALUE**: Verifies base URL resolution for each classification.
///
/// **WHY THIS MATTERS**: This is the endpoint the relay forwards to.
///
/// **BUG THIS CATCHES**: Would catch host ids resolved over plain HTTP or opaque ids
/// ignoring the configured provider.
#[test]
fn given_each_target_kind_when_resolved_then_expected_base_url() {
    // GIVEN: The configured provider
    let provider = provider_url();

    // WHEN: Resolving each kind of identifier
    let from_host = resolve_base_url("api.einforma.com", &provider).unwrap();
    let from_url = resolve_base_url("http://localhost:9000/companies", &provider).unwrap();
    let from_opaque = resolve_base_url("a1b2c3", &provider).unwrap();

    // THEN: Hosts use HTTPS, URLs are verbatim, opaque ids use the provider
    assert_eq!(from_host.as_str(), "https://api.einforma.com/");
    assert_eq!(from_url.as_str(), "http://localhost:9000/companies");
    assert_eq!(from_opaque, provider);
}

/// **VALUE**: Verifies the Basic authorization value encoding.
///
/// **WHY THIS MATTERS**: The provider rejects anything other than base64(`id:secret`).
///
/// **BUG THIS CATCHES**: Would catch encoding only the secret or using URL-safe base64.
#[test]
fn given_credentials_when_basic_auth_built_then_base64_of_id_colon_secret() {
    // GIVEN: Known credentials
    let credentials = Credentials::new("user", "p@ss").unwrap();

    // WHEN: Building the header value
    let value = basic_auth_value(&credentials);

    // THEN: "user:p@ss" base64-encoded
    assert_eq!(value, "Basic dXNlcjpwQHNz");
}

/// **VALUE**: Verifies the live request header set.
///
/// **WHY THIS MATTERS**: These are the headers the primary relay must forward unchanged.
///
/// **BUG THIS CATCHES**: Would catch a missing Accept header or an authorization value
/// that is not marked sensitive (and so shows up in debug output).
#[test]
fn given_credentials_when_live_headers_built_then_auth_and_json_headers_present() {
    // GIVEN: Credentials
    let credentials = Credentials::new("user", "secret").unwrap();

    // WHEN: Building headers
    let headers = live_request_headers(&credentials).unwrap();

    // THEN: Exactly authorization plus JSON negotiation
    assert_eq!(headers.len(), 3);
    assert!(headers[AUTHORIZATION].is_sensitive());
    assert_eq!(headers[CONTENT_TYPE], "application/json");
    assert_eq!(headers[ACCEPT], "application/json");
}
