//! Text renderings of the cached query result.

use crate::cli::View;

use models::{CompanyRecord, QueryResult};

use std::fmt::Write as _;

const NOT_FOUND_MESSAGE: &str =
    "No data found for this query. Try again with different search parameters.";
const NEW_SEARCH_HINT: &str = "Start a new search with: einforma search <TERM>";
const MISSING_VALUE: &str = "-";

/// Render `result` for `view`, or the not-found state when there is nothing to show.
pub fn render(result: Option<&QueryResult>, view: View) -> String {
    let Some(result) = result.filter(|result| result.is_found()) else {
        return render_not_found();
    };
    let Some(company) = result.primary() else {
        return render_not_found();
    };

    let mut out = header(result, company);

    let sections = match view {
        View::Overview => vec![overview(company)],
        View::Financials => vec![financials(company)],
        View::Details => vec![details(company)],
        View::All => vec![overview(company), financials(company), details(company)],
    };
    for section in sections {
        out.push('\n');
        out.push_str(&section);
    }

    if !result.others().is_empty() {
        out.push('\n');
        out.push_str(&other_companies(result.others()));
    }

    out
}

pub fn render_not_found() -> String {
    format!("{NOT_FOUND_MESSAGE}\n{NEW_SEARCH_HINT}\n")
}

fn header(result: &QueryResult, company: &CompanyRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", company.name);
    let _ = writeln!(
        out,
        "{} | CIF: {}",
        or_missing(&company.legal_form),
        or_missing(&company.cif)
    );
    if !result.timestamp.is_empty() {
        let _ = writeln!(out, "Retrieved: {}", result.timestamp);
    }
    out
}

/// General information and activity.
pub fn overview(company: &CompanyRecord) -> String {
    let mut out = String::from("== Overview ==\n");
    let _ = writeln!(out, "  Status:        {}", or_missing(&company.status));
    let _ = writeln!(out, "  Founded:       {}", or_missing(&company.foundation_date));
    let _ = writeln!(out, "  Share capital: {}", capital_text(company));
    let _ = writeln!(out, "  Employees:     {}", company.employees);
    let _ = writeln!(out, "  Address:       {}", or_missing(&company.address));
    let _ = writeln!(out, "  Activity:      {}", or_missing(&company.activity));
    out
}

/// Revenue with year-over-year variation and profit with margin, newest year first.
pub fn financials(company: &CompanyRecord) -> String {
    let mut out = String::from("== Financials ==\n");

    if company.financials.is_empty() {
        out.push_str("  No financial data available\n");
        return out;
    }

    out.push_str("  Revenue\n");
    let _ = writeln!(out, "    {:<6} {:>16} {:>10}", "Year", "Amount", "Change");
    for row in company.financials.revenue_rows() {
        let _ = writeln!(
            out,
            "    {:<6} {:>16} {:>10}",
            row.year,
            format_currency(row.value),
            format_percent(row.variation_pct, true)
        );
    }

    out.push_str("  Profit\n");
    let _ = writeln!(out, "    {:<6} {:>16} {:>10}", "Year", "Amount", "Margin");
    for row in company.financials.profit_rows() {
        let _ = writeln!(
            out,
            "    {:<6} {:>16} {:>10}",
            row.year,
            format_currency(row.value),
            format_percent(row.margin_pct, false)
        );
    }

    out
}

/// Registry data.
pub fn details(company: &CompanyRecord) -> String {
    let mut out = String::from("== Details ==\n");
    let _ = writeln!(out, "  Identifier:    {}", or_missing(&company.id));
    let _ = writeln!(out, "  CIF:           {}", or_missing(&company.cif));
    let _ = writeln!(out, "  Legal form:    {}", or_missing(&company.legal_form));
    let _ = writeln!(out, "  Status:        {}", or_missing(&company.status));
    let _ = writeln!(out, "  Founded:       {}", or_missing(&company.foundation_date));
    let _ = writeln!(out, "  Share capital: {}", capital_text(company));
    let _ = writeln!(out, "  Workforce:     {} employees", company.employees);
    out
}

fn other_companies(others: &[CompanyRecord]) -> String {
    let mut out = String::from("== Other companies found ==\n");
    for company in others {
        let _ = writeln!(
            out,
            "  {} ({}) CIF {}: {}",
            company.name,
            or_missing(&company.legal_form),
            or_missing(&company.cif),
            or_missing(&company.address)
        );
    }
    out
}

fn capital_text(company: &CompanyRecord) -> String {
    match company.capital.amount() {
        Some(amount) => format_currency(amount),
        None => or_missing(company.capital.as_str()).to_string(),
    }
}

fn or_missing(value: &str) -> &str {
    if value.trim().is_empty() {
        MISSING_VALUE
    } else {
        value
    }
}

/// Whole euros with `.` thousands separators, grouped from five digits (`1.250.000 €`, `3000 €`).
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let grouped = if digits.len() > 4 {
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (index, digit) in digits.chars().enumerate() {
            if index > 0 && (digits.len() - index) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }
        grouped
    } else {
        digits
    };

    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{grouped} €")
}

/// One decimal; `signed` adds `+` to positive values.
pub fn format_percent(value: Option<f64>, signed: bool) -> String {
    match value {
        None => MISSING_VALUE.to_string(),
        Some(pct) => {
            let sign = if signed && pct > 0.0 { "+" } else { "" };
            format!("{sign}{pct:.1}%")
        }
    }
}
