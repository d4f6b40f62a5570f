use crate::dispatcher::simulated_result;

use models::QueryParameters;

use std::time::SystemTime;

/// **VALUE**: Verifies the simulated dataset content.
///
/// **WHY THIS MATTERS**: Simulated mode is the default, so this is what every new user sees
/// and what the live path falls back to.
///
/// **BUG THIS CATCHES**: Would catch reordered companies or a wrong revenue figure.
#[test]
fn given_any_query_when_simulated_then_two_canned_companies_in_order() {
    // GIVEN: A query
    let params = QueryParameters {
        q: Some("Acme".to_string()),
        ..Default::default()
    };

    // WHEN: Building the simulated result
    let result = simulated_result(&params);

    // THEN: Two companies, Empresa Ejemplo first
    assert_eq!(result.results.len(), 2);
    let first = &result.results[0];
    assert_eq!(first.name, "Empresa Ejemplo S.L.");
    assert_eq!(first.legal_form, "Sociedad Limitada");
    assert_eq!(first.capital.as_str(), "150000.00");
    assert_eq!(first.employees, 48);
    assert_eq!(first.financials.revenue.get("2021"), Some(&1_250_000.0));
    assert_eq!(first.financials.profit.get("2019"), Some(&180_000.0));

    let second = &result.results[1];
    assert_eq!(second.name, "Test Corporation Española S.A.");
    assert_eq!(second.cif, "A87654321");
    assert_eq!(second.financials.revenue.get("2021"), Some(&5_450_000.0));
}

/// **VALUE**: Verifies that the result echoes the query and carries a current timestamp.
///
/// **WHY THIS MATTERS**: The results header shows what was searched and when.
///
/// **BUG THIS CATCHES**: Would catch a hard-coded timestamp or a dropped query echo.
#[test]
fn given_query_when_simulated_then_query_echoed_with_fresh_timestamp() {
    // GIVEN: A query with filters
    let params = QueryParameters {
        q: Some("Acme".to_string()),
        kind: Some("company".to_string()),
        location: Some("Madrid".to_string()),
        sector: None,
    };
    let before = SystemTime::now();

    // WHEN: Building the simulated result
    let result = simulated_result(&params);

    // THEN: Query echoed, timestamp is RFC 3339 and current
    assert_eq!(result.query, params);
    let stamped = humantime::parse_rfc3339(&result.timestamp).unwrap();
    let lag = before.duration_since(stamped).map(|d| d.as_millis()).unwrap_or(0);
    assert!(lag < 1, "Timestamp should not predate the call beyond millisecond truncation");
}
