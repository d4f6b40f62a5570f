use crate::cli::View;
use crate::views::{format_currency, format_percent, render, render_not_found};

use lookup_core::dispatcher::simulated_result;
use models::{QueryParameters, QueryResult};

fn canned() -> QueryResult {
    simulated_result(&QueryParameters {
        q: Some("Acme".to_string()),
        ..Default::default()
    })
}

/// **VALUE**: Verifies Spanish-style euro formatting.
///
/// **WHY THIS MATTERS**: Figures are read by Spanish users used to `1.250.000 €`.
///
/// **BUG THIS CATCHES**: Would catch grouping four-digit amounts or dropping the sign.
#[test]
fn given_amounts_when_formatted_then_grouped_euros() {
    assert_eq!(format_currency(1_250_000.0), "1.250.000 €");
    assert_eq!(format_currency(150_000.0), "150.000 €");
    assert_eq!(format_currency(3000.0), "3000 €");
    assert_eq!(format_currency(12_345.6), "12.346 €");
    assert_eq!(format_currency(-98_000.0), "-98.000 €");
    assert_eq!(format_currency(0.0), "0 €");
}

#[test]
fn given_percentages_when_formatted_then_one_decimal() {
    assert_eq!(format_percent(Some(27.551), true), "+27.6%");
    assert_eq!(format_percent(Some(-4.0), true), "-4.0%");
    assert_eq!(format_percent(Some(25.6), false), "25.6%");
    assert_eq!(format_percent(None, true), "-");
}

/// **VALUE**: Verifies the empty state when there is no result or no companies.
///
/// **WHY THIS MATTERS**: A search with no matches must tell the user what to do next.
///
/// **BUG THIS CATCHES**: Would catch rendering an empty header for an empty result.
#[test]
fn given_absent_or_empty_result_when_rendered_then_not_found_state() {
    // GIVEN: No result and an empty one
    let empty = QueryResult::default();

    // WHEN / THEN: Both render the not-found state
    assert_eq!(render(None, View::All), render_not_found());
    assert_eq!(render(Some(&empty), View::Overview), render_not_found());
    assert!(render_not_found().contains("einforma search"));
}

/// **VALUE**: Verifies the financial view computes variation and margin.
///
/// **WHY THIS MATTERS**: These derived figures are the main value of the financials view.
///
/// **BUG THIS CATCHES**: Would catch oldest-first ordering or a margin over the wrong year.
#[test]
fn given_canned_result_when_financials_rendered_then_variation_and_margin_shown() {
    // GIVEN: The canned dataset
    let result = canned();

    // WHEN: Rendering the financials view
    let text = render(Some(&result), View::Financials);

    // THEN: 2021 revenue first with +27.6% over 2020, margin 25.6%
    assert!(text.starts_with("Empresa Ejemplo S.L.\n"));
    let revenue_2021 = text.find("1.250.000 €").unwrap();
    let revenue_2019 = text.find("850.000 €").unwrap();
    assert!(revenue_2021 < revenue_2019, "Newest year first");
    assert!(text.contains("+27.6%"));
    assert!(text.contains("25.6%"));
    assert!(!text.contains("== Overview =="));
}

/// **VALUE**: Verifies the full view includes every section and the other companies.
///
/// **WHY THIS MATTERS**: The second canned company is only visible in that list.
///
/// **BUG THIS CATCHES**: Would catch dropping everything after the primary record.
#[test]
fn given_two_companies_when_rendered_all_then_sections_and_others_listed() {
    // GIVEN: The canned dataset
    let result = canned();

    // WHEN: Rendering everything
    let text = render(Some(&result), View::All);

    // THEN: Sections in order and the second company listed
    let overview = text.find("== Overview ==").unwrap();
    let financials = text.find("== Financials ==").unwrap();
    let details = text.find("== Details ==").unwrap();
    let others = text.find("== Other companies found ==").unwrap();
    assert!(overview < financials && financials < details && details < others);
    assert!(text.contains("Sociedad Limitada | CIF: B12345678"));
    assert!(text.contains("Share capital: 150.000 €"));
    assert!(text.contains("Test Corporation Española S.A. (Sociedad Anónima) CIF A87654321"));
}
