//! Shared building blocks for the einforma lookup workspace.
//!
//! ## Architecture
//!
//! - **common** (this crate): error location tracking, secret handling, HTTP status helpers
//! - **models**: Pure data structures (credentials, queries, company records)
//! - **lookup-core**: Storage, relay transport and the query dispatcher
//! - **einforma**: CLI wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_secret;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_secret::RedactedSecret;
