//! Domain models for the einforma company lookup.
//!
//! This crate contains pure data structures: credentials, the data-mode
//! preference, query parameters and the company records returned by the
//! provider. The only logic here is validation at construction time and
//! derived views over financial figures.

pub mod company;
pub mod credentials;
pub mod data_mode;
pub mod error;
pub mod query;
pub mod query_result;

#[cfg(test)]
mod tests;

pub use common::ErrorLocation;

pub use company::{Capital, CompanyRecord, Financials, ProfitRow, RevenueRow};
pub use credentials::Credentials;
pub use data_mode::DataMode;
pub use error::model_error::ModelError;
pub use query::builder::QueryParametersBuilder;
pub use query::{QueryKind, QueryParameters};
pub use query_result::QueryResult;
