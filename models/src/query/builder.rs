use crate::{ErrorLocation, ModelError, QueryKind, QueryParameters};

use std::panic::Location;

/// Builder for validated search submissions.
///
/// Mirrors the search form: a search term is mandatory, the query type defaults
/// to [`QueryKind::Company`], and blank optional filters are dropped.
#[derive(Debug, Default)]
pub struct QueryParametersBuilder {
    term: Option<String>,
    kind: Option<QueryKind>,
    location: Option<String>,
    sector: Option<String>,
}

impl QueryParametersBuilder {
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    pub fn with_kind(mut self, kind: QueryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    #[track_caller]
    pub fn build(self) -> Result<QueryParameters, ModelError> {
        let term = self.term.ok_or_else(|| ModelError::Validation {
            message: String::from("Search term is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let term = term.trim();
        if term.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Search term cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(QueryParameters {
            q: Some(term.to_string()),
            kind: Some(self.kind.unwrap_or_default().as_str().to_string()),
            location: non_blank(self.location),
            sector: non_blank(self.sector),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
