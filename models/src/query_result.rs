use crate::company::null_as_default;
use crate::{CompanyRecord, QueryParameters};

use serde::{Deserialize, Serialize};

/// Outcome of one dispatch: the echoed query, when it ran, and the companies found.
///
/// An empty, absent or `null` `results` list is the "not found" signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub query: QueryParameters,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<CompanyRecord>,
}

impl QueryResult {
    pub fn is_found(&self) -> bool {
        !self.results.is_empty()
    }

    /// The record shown in the detail views.
    pub fn primary(&self) -> Option<&CompanyRecord> {
        self.results.first()
    }

    /// Every record after the primary one.
    pub fn others(&self) -> &[CompanyRecord] {
        self.results.get(1..).unwrap_or(&[])
    }
}
