use crate::QueryResult;

/// **VALUE**: Verifies that a provider payload in the documented shape decodes.
///
/// **WHY THIS MATTERS**: Any decode failure in live mode silently degrades to simulated
/// data, so a field-name mismatch would hide every real result.
///
/// **BUG THIS CATCHES**: Would catch renamed fields (`foundationDate`, `type`) or a
/// capital that only accepts numbers.
#[test]
fn given_provider_payload_when_deserialized_then_fields_are_mapped() {
    // GIVEN: A payload in the provider's JSON shape
    let json = r#"{
        "query": { "q": "Acme", "type": "company" },
        "timestamp": "2024-01-01T00:00:00Z",
        "results": [{
            "id": "1",
            "name": "Acme S.L.",
            "type": "Sociedad Limitada",
            "cif": "B00000000",
            "address": "Calle 1",
            "status": "Activa",
            "foundationDate": "2001-02-03",
            "capital": "3000.00",
            "activity": "Testing",
            "employees": 4,
            "financials": { "revenue": { "2021": 10 }, "profit": { "2021": 1 } }
        }]
    }"#;

    // WHEN: Deserializing
    let result: QueryResult = serde_json::from_str(json).unwrap();

    // THEN: Fields land where the views expect them
    assert!(result.is_found());
    let company = result.primary().unwrap();
    assert_eq!(company.legal_form, "Sociedad Limitada");
    assert_eq!(company.foundation_date, "2001-02-03");
    assert_eq!(company.financials.revenue.get("2021"), Some(&10.0));
    assert_eq!(result.query.kind.as_deref(), Some("company"));
    assert!(result.others().is_empty());
}

/// **VALUE**: Verifies that an absent `results` key means "not found" rather than an error.
#[test]
fn given_payload_without_results_when_deserialized_then_not_found() {
    let result: QueryResult = serde_json::from_str(r#"{"timestamp":"t"}"#).unwrap();

    assert!(!result.is_found());
    assert!(result.primary().is_none());
    assert!(result.others().is_empty());
}

/// **VALUE**: Verifies that `null` results and `null` record fields decode as empty values.
///
/// **WHY THIS MATTERS**: The provider answers "not found" with `"results": null`, and sparse
/// records carry `null` scalars; a decode error here turns into simulated data in live mode.
///
/// **BUG THIS CATCHES**: Would catch relying on `#[serde(default)]`, which only covers a
/// missing key and rejects an explicit `null`.
#[test]
fn given_null_results_and_null_fields_when_deserialized_then_defaults_are_used() {
    // GIVEN: A not-found answer and a sparse record
    let not_found = r#"{"query":{"q":"Acme"},"timestamp":"t","results":null}"#;
    let sparse = r#"{"results":[{
        "name": "Acme S.L.",
        "cif": null,
        "capital": null,
        "employees": null,
        "financials": {"revenue": null, "profit": {"2022": 5}}
    }]}"#;

    // WHEN: Deserializing both
    let not_found: QueryResult = serde_json::from_str(not_found).unwrap();
    let sparse: QueryResult = serde_json::from_str(sparse).unwrap();

    // THEN: The first is a not-found result that keeps its query echo
    assert!(!not_found.is_found());
    assert_eq!(not_found.query.q.as_deref(), Some("Acme"));

    // THEN: The second decodes with defaults in place of the nulls
    let company = sparse.primary().unwrap();
    assert_eq!(company.name, "Acme S.L.");
    assert_eq!(company.cif, "");
    assert_eq!(company.capital.amount(), None);
    assert_eq!(company.employees, 0);
    assert!(company.financials.revenue.is_empty());
    assert_eq!(company.financials.profit.get("2022"), Some(&5.0));
}
