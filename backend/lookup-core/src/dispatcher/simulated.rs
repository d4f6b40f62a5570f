//! Canned dataset served in simulated mode and as the live-path fallback.

use models::{Capital, CompanyRecord, Financials, QueryParameters, QueryResult};

use std::collections::BTreeMap;
use std::time::SystemTime;

struct CannedCompany {
    id: &'static str,
    name: &'static str,
    legal_form: &'static str,
    cif: &'static str,
    address: &'static str,
    foundation_date: &'static str,
    capital: &'static str,
    activity: &'static str,
    employees: u32,
    revenue: [(&'static str, f64); 3],
    profit: [(&'static str, f64); 3],
}

const CANNED_COMPANIES: [CannedCompany; 2] = [
    CannedCompany {
        id: "1234567890",
        name: "Empresa Ejemplo S.L.",
        legal_form: "Sociedad Limitada",
        cif: "B12345678",
        address: "Calle Ejemplo, 123, 28001 Madrid",
        foundation_date: "2005-06-15",
        capital: "150000.00",
        activity: "Desarrollo de software y consultoría tecnológica",
        employees: 48,
        revenue: [("2021", 1_250_000.0), ("2020", 980_000.0), ("2019", 850_000.0)],
        profit: [("2021", 320_000.0), ("2020", 210_000.0), ("2019", 180_000.0)],
    },
    CannedCompany {
        id: "0987654321",
        name: "Test Corporation Española S.A.",
        legal_form: "Sociedad Anónima",
        cif: "A87654321",
        address: "Avenida Test, 456, 08001 Barcelona",
        foundation_date: "1995-03-22",
        capital: "500000.00",
        activity: "Comercio al por mayor de equipos electrónicos",
        employees: 112,
        revenue: [("2021", 5_450_000.0), ("2020", 4_980_000.0), ("2019", 4_250_000.0)],
        profit: [("2021", 890_000.0), ("2020", 750_000.0), ("2019", 620_000.0)],
    },
];

const ACTIVE_STATUS: &str = "Activa";

/// The two canned companies, echoing `params` with a fresh timestamp.
///
/// The dataset is the same whatever the query asks for.
pub fn simulated_result(params: &QueryParameters) -> QueryResult {
    QueryResult {
        query: params.clone(),
        timestamp: humantime::format_rfc3339_millis(SystemTime::now()).to_string(),
        results: CANNED_COMPANIES.iter().map(to_record).collect(),
    }
}

fn to_record(company: &CannedCompany) -> CompanyRecord {
    CompanyRecord {
        id: company.id.to_string(),
        cif: company.cif.to_string(),
        name: company.name.to_string(),
        legal_form: company.legal_form.to_string(),
        address: company.address.to_string(),
        status: ACTIVE_STATUS.to_string(),
        foundation_date: company.foundation_date.to_string(),
        capital: Capital::new(company.capital),
        activity: company.activity.to_string(),
        employees: company.employees,
        financials: Financials {
            revenue: to_series(&company.revenue),
            profit: to_series(&company.profit),
        },
    }
}

fn to_series(points: &[(&str, f64)]) -> BTreeMap<String, f64> {
    points
        .iter()
        .map(|(year, value)| (year.to_string(), *value))
        .collect()
}
