use crate::error::TransportError;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Failures that stop a dispatch before any data is produced.
#[derive(Debug, ThisError)]
pub enum DispatchError {
    #[error("Missing Credentials Error: {message} {location}")]
    MissingCredentials {
        message: String,
        location: ErrorLocation,
    },
}

impl DispatchError {
    #[track_caller]
    pub fn missing_credentials() -> Self {
        DispatchError::MissingCredentials {
            message: String::from("Live data mode requires stored API credentials"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Failures on the live path. The dispatcher recovers from all of them by
/// falling back to simulated data.
#[derive(Debug, ThisError)]
pub enum LiveQueryError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Target Error: {message} {location}")]
    Target {
        message: String,
        location: ErrorLocation,
    },

    #[error("Decode Error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },
}

impl From<url::ParseError> for LiveQueryError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        LiveQueryError::Target {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for LiveQueryError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        LiveQueryError::Decode {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
