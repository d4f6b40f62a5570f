use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One company as returned by the provider (or by the simulated dataset).
///
/// Unknown, missing or `null` fields fall back to defaults so that a sparse
/// provider payload still decodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cif: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub legal_form: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub foundation_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub capital: Capital,
    #[serde(deserialize_with = "null_as_default")]
    pub activity: String,
    #[serde(deserialize_with = "null_as_default")]
    pub employees: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub financials: Financials,
}

/// Decode `null` as the type's default, the same as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Share capital kept as its decimal text.
///
/// The provider sends it either as a JSON string (`"150000.00"`) or a number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capital(String);

impl Capital {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value, if the text is a valid decimal.
    pub fn amount(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok()
    }
}

impl Serialize for Capital {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Capital {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawCapital {
            Text(String),
            Integer(i64),
            Decimal(f64),
        }

        Ok(match RawCapital::deserialize(deserializer)? {
            RawCapital::Text(text) => Capital(text),
            RawCapital::Integer(value) => Capital(value.to_string()),
            RawCapital::Decimal(value) => Capital(value.to_string()),
        })
    }
}

/// Yearly revenue and profit, keyed by four-digit year strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Financials {
    #[serde(deserialize_with = "null_as_default")]
    pub revenue: BTreeMap<String, f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub profit: BTreeMap<String, f64>,
}

/// Revenue for one year with the change against the previous year.
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueRow {
    pub year: String,
    pub value: f64,
    /// Percentage change against the next older year, `None` for the oldest year.
    pub variation_pct: Option<f64>,
}

/// Profit for one year with its margin over that year's revenue.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfitRow {
    pub year: String,
    pub value: f64,
    pub margin_pct: Option<f64>,
}

impl Financials {
    /// Revenue rows, newest year first.
    pub fn revenue_rows(&self) -> Vec<RevenueRow> {
        let sorted = sorted_desc(&self.revenue);

        sorted
            .iter()
            .enumerate()
            .map(|(index, (year, value))| {
                let variation_pct = sorted
                    .get(index + 1)
                    .map(|(_, previous)| *previous)
                    .filter(|previous| *previous != 0.0)
                    .map(|previous| (*value - previous) / previous * 100.0);

                RevenueRow {
                    year: year.to_string(),
                    value: *value,
                    variation_pct,
                }
            })
            .collect()
    }

    /// Profit rows, newest year first.
    pub fn profit_rows(&self) -> Vec<ProfitRow> {
        sorted_desc(&self.profit)
            .into_iter()
            .map(|(year, value)| {
                let margin_pct = self
                    .revenue
                    .get(year)
                    .copied()
                    .filter(|revenue| *revenue != 0.0)
                    .map(|revenue| value / revenue * 100.0);

                ProfitRow {
                    year: year.to_string(),
                    value,
                    margin_pct,
                }
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.revenue.is_empty() && self.profit.is_empty()
    }
}

// Numeric years sort before anything that does not parse as a year.
fn sorted_desc(series: &BTreeMap<String, f64>) -> Vec<(&str, f64)> {
    let mut entries: Vec<(&str, f64)> = series
        .iter()
        .map(|(year, value)| (year.as_str(), *value))
        .collect();

    entries.sort_by(|(a, _), (b, _)| {
        (b.parse::<u32>().ok(), *b).cmp(&(a.parse::<u32>().ok(), *a))
    });

    entries
}
