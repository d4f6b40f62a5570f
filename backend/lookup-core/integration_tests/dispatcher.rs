use crate::helpers::{
    PRIMARY_PATH, SECONDARY_PATH, TARGET_PARAM, TEST_LATENCY, UNREACHABLE_RELAY, harness,
    mock_relays, relays, search, test_credentials,
};

use lookup_core::error::DispatchError;
use lookup_core::{NotificationLevel, ResultSource};

use models::{Credentials, DataMode, QueryResult};

use std::time::Instant;

use wiremock::matchers::path;
use wiremock::{Mock, MockServer, ResponseTemplate};

const LIVE_BODY: &str = r#"{
    "query": {"q": "Acme"},
    "timestamp": "2024-05-01T10:00:00.000Z",
    "results": [{
        "id": "42",
        "name": "Acme Ibérica S.L.",
        "type": "Sociedad Limitada",
        "cif": "B00000042",
        "capital": 3000,
        "employees": 7,
        "financials": {"revenue": {"2023": 100000}, "profit": {"2023": 5000}}
    }]
}"#;

/// **VALUE**: End to end check of the default simulated path.
///
/// **WHY THIS MATTERS**: This is what every user sees before configuring credentials.
///
/// **BUG THIS CATCHES**: Would catch skipping the simulated latency, touching the network
/// in simulated mode, or not publishing the result to the cache.
#[tokio::test]
async fn given_simulated_mode_when_dispatching_then_canned_data_after_latency() {
    // GIVEN: Default mode, relays that would fail if used
    let h = harness(relays(UNREACHABLE_RELAY, UNREACHABLE_RELAY));
    let started = Instant::now();

    // WHEN: Dispatching a search
    let outcome = h.dispatcher.dispatch(&search("Acme"), None).await.unwrap();

    // THEN: Simulated data, delivered no sooner than the latency
    assert!(started.elapsed() >= TEST_LATENCY);
    assert_eq!(outcome.source, ResultSource::Simulated);
    let first = outcome.result.primary().unwrap();
    assert_eq!(first.name, "Empresa Ejemplo S.L.");
    assert_eq!(first.financials.revenue.get("2021"), Some(&1_250_000.0));
    assert_eq!(outcome.result.query.q.as_deref(), Some("Acme"));

    assert_eq!(h.cache.get().await, Some(outcome.result));
    assert_eq!(h.notifier.levels(), vec![NotificationLevel::Success]);
}

/// **VALUE**: Verifies live mode without credentials aborts and leaves the cache alone.
///
/// **WHY THIS MATTERS**: The results view must keep showing the previous search rather
/// than a blank or simulated page the user did not ask for.
///
/// **BUG THIS CATCHES**: Would catch clearing the cache, falling back to simulated data,
/// or sending a request without credentials.
#[tokio::test]
async fn given_live_mode_without_credentials_when_dispatching_then_error_and_cache_untouched() {
    // GIVEN: Live mode, a previous result in the cache, no credentials
    let h = harness(relays(UNREACHABLE_RELAY, UNREACHABLE_RELAY));
    h.preferences.set_data_mode(DataMode::Live).unwrap();
    let previous = QueryResult {
        timestamp: "previous".to_string(),
        ..Default::default()
    };
    h.cache.set(previous.clone()).await;

    // WHEN: Dispatching without credentials
    let result = h.dispatcher.dispatch(&search("Acme"), None).await;

    // THEN: MissingCredentials, cache unchanged, one error notification
    assert!(matches!(result, Err(DispatchError::MissingCredentials { .. })));
    assert_eq!(h.cache.get().await, Some(previous));
    assert_eq!(h.notifier.levels(), vec![NotificationLevel::Error]);
}

/// **VALUE**: End to end check of total relay failure in live mode.
///
/// **WHY THIS MATTERS**: Public relays are unreliable; the user must still get data and be
/// told that it is simulated.
///
/// **BUG THIS CATCHES**: Would catch surfacing the transport error, emitting the fallback
/// notice before the failure, or leaving the cache empty.
#[tokio::test]
async fn given_both_relays_fail_when_dispatching_live_then_canned_data_with_fallback_notices() {
    // GIVEN: Live mode, credentials, both relays refusing
    let server = MockServer::start().await;
    Mock::given(path(PRIMARY_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path(SECONDARY_PATH))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;
    let h = harness(mock_relays(&server));
    h.preferences.set_data_mode(DataMode::Live).unwrap();
    h.preferences.set(test_credentials()).unwrap();

    // WHEN: Dispatching with the stored credentials
    let credentials = h.preferences.get();
    let outcome = h
        .dispatcher
        .dispatch(&search("Acme"), credentials.as_ref())
        .await
        .unwrap();

    // THEN: Canned dataset served as fallback
    assert_eq!(outcome.source, ResultSource::SimulatedFallback);
    assert!(outcome.source.is_simulated());
    let cached = h.cache.get().await.unwrap();
    let names: Vec<&str> = cached.results.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Empresa Ejemplo S.L.", "Test Corporation Española S.A."]
    );

    // THEN: Failure notice, then fallback notice, then the loaded data
    let notifications = h.notifier.notifications();
    assert_eq!(
        h.notifier.levels(),
        vec![
            NotificationLevel::Error,
            NotificationLevel::Info,
            NotificationLevel::Success
        ]
    );
    assert_eq!(notifications[1].message, "Falling back to simulated data");
}

/// **VALUE**: Verifies a successful live query through the primary relay.
///
/// **WHY THIS MATTERS**: This is the path that actually reaches the provider.
///
/// **BUG THIS CATCHES**: Would catch a wrong target URL (empty parameters sent, wrong base
/// for a host-style client id), missing Basic auth, or decoding numeric capital.
#[tokio::test]
async fn given_live_mode_and_primary_ok_when_dispatching_then_provider_result_cached() {
    // GIVEN: A host-style client id and a primary relay returning provider JSON
    let server = MockServer::start().await;
    Mock::given(path(PRIMARY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(LIVE_BODY))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path(SECONDARY_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let h = harness(mock_relays(&server));
    h.preferences.set_data_mode(DataMode::Live).unwrap();
    let credentials = Credentials::new("api.einforma.com", "secret").unwrap();

    // WHEN: Dispatching with blank filters
    let mut params = search("Acme");
    params.kind = Some(String::new());
    params.sector = Some(String::new());
    let outcome = h
        .dispatcher
        .dispatch(&params, Some(&credentials))
        .await
        .unwrap();

    // THEN: Live result decoded and cached
    assert_eq!(outcome.source, ResultSource::Live);
    let company = outcome.result.primary().unwrap();
    assert_eq!(company.name, "Acme Ibérica S.L.");
    assert_eq!(company.capital.amount(), Some(3000.0));
    assert_eq!(h.cache.get().await, Some(outcome.result.clone()));
    assert_eq!(h.notifier.levels(), vec![NotificationLevel::Success]);

    // THEN: The relay was asked for https://{host}?q=Acme with Basic auth
    let requests = server.received_requests().await.unwrap();
    let forwarded: Vec<(String, String)> = requests[0].url.query_pairs().into_owned().collect();
    assert_eq!(
        forwarded,
        vec![(TARGET_PARAM.to_string(), "https://api.einforma.com/?q=Acme".to_string())]
    );
    assert_eq!(
        requests[0].headers.get("authorization").unwrap(),
        "Basic YXBpLmVpbmZvcm1hLmNvbTpzZWNyZXQ="
    );
}

/// **VALUE**: Verifies that a live "not found" answer is served as an empty live result.
///
/// **WHY THIS MATTERS**: The provider reports no matches with `"results": null`; showing the
/// canned companies instead would present invented data as a real search hit.
///
/// **BUG THIS CATCHES**: Would catch a decode failure on `null` that routes the dispatch
/// into the simulated fallback.
#[tokio::test]
async fn given_live_null_results_when_dispatching_then_live_not_found() {
    // GIVEN: A primary relay answering with a not-found body
    let server = MockServer::start().await;
    Mock::given(path(PRIMARY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"query":{"q":"Acme"},"timestamp":"t","results":null}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    let h = harness(mock_relays(&server));
    h.preferences.set_data_mode(DataMode::Live).unwrap();

    // WHEN: Dispatching
    let outcome = h
        .dispatcher
        .dispatch(&search("Acme"), Some(&test_credentials()))
        .await
        .unwrap();

    // THEN: A live result with no companies, cached as is
    assert_eq!(outcome.source, ResultSource::Live);
    assert!(outcome.result.results.is_empty());
    assert!(!outcome.result.is_found());
    assert_eq!(h.cache.get().await, Some(outcome.result));
    assert_eq!(h.notifier.levels(), vec![NotificationLevel::Success]);
}

/// **VALUE**: Tests that an undecodable provider body is treated like a transport failure.
///
/// **WHY THIS MATTERS**: Relays return HTML error pages with status 200.
///
/// **BUG THIS CATCHES**: Would catch propagating the decode error instead of falling back.
#[tokio::test]
async fn given_non_json_body_when_dispatching_live_then_falls_back_to_simulated() {
    // GIVEN: A primary relay answering with HTML
    let server = MockServer::start().await;
    Mock::given(path(PRIMARY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
        .mount(&server)
        .await;
    let h = harness(mock_relays(&server));
    h.preferences.set_data_mode(DataMode::Live).unwrap();

    // WHEN: Dispatching
    let outcome = h
        .dispatcher
        .dispatch(&search("Acme"), Some(&test_credentials()))
        .await
        .unwrap();

    // THEN: Simulated fallback, cache holds canned data
    assert_eq!(outcome.source, ResultSource::SimulatedFallback);
    assert_eq!(h.cache.get().await.unwrap().results.len(), 2);
    assert_eq!(h.notifier.levels()[0], NotificationLevel::Error);
}

/// **VALUE**: Verifies that each dispatch gets its own identifier and the last one wins the cache.
///
/// **WHY THIS MATTERS**: Log lines are correlated by dispatch id; the view shows the latest search.
///
/// **BUG THIS CATCHES**: Would catch a shared id or a cache that keeps the first result.
#[tokio::test]
async fn given_two_dispatches_when_completed_then_distinct_ids_and_last_result_cached() {
    // GIVEN: Simulated mode
    let h = harness(relays(UNREACHABLE_RELAY, UNREACHABLE_RELAY));

    // WHEN: Dispatching twice
    let first = h.dispatcher.dispatch(&search("first"), None).await.unwrap();
    let second = h.dispatcher.dispatch(&search("second"), None).await.unwrap();

    // THEN: Different ids, cache holds the second query, storage untouched
    assert_ne!(first.dispatch_id, second.dispatch_id);
    let cached = h.cache.get().await.unwrap();
    assert_eq!(cached.query.q.as_deref(), Some("second"));
    assert!(h.store.is_empty(), "Dispatching never writes preferences");
}
