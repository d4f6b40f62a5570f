pub mod builder;

use crate::{ErrorLocation, ModelError};

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Search parameters for one lookup.
///
/// Every key is optional; keys whose value is empty are never sent to the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
}

impl QueryParameters {
    /// Non-empty parameters in their fixed wire order (`q`, `type`, `location`, `sector`).
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("q", &self.q),
            ("type", &self.kind),
            ("location", &self.location),
            ("sector", &self.sector),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .filter(|value| !value.is_empty())
                .map(|value| (key, value))
        })
        .collect()
    }
}

/// Query types offered by the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryKind {
    #[default]
    Company,
    Person,
    Financial,
    Legal,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Company => "company",
            QueryKind::Person => "person",
            QueryKind::Financial => "financial",
            QueryKind::Legal => "legal",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryKind {
    type Err = ModelError;

    #[track_caller]
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "company" => Ok(QueryKind::Company),
            "person" => Ok(QueryKind::Person),
            "financial" => Ok(QueryKind::Financial),
            "legal" => Ok(QueryKind::Legal),
            other => Err(ModelError::Parse {
                message: format!("Unknown query type '{other}'"),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
