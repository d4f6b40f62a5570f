use common::ErrorLocation;
use lookup_core::error::{CoreError, DispatchError, StorageError};
use models::ModelError;

use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by CLI commands.
///
/// Serializable so `--json` output can report failures in the same format as results.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum AppError {
    /// Error from the application shell (logger, data directory)
    #[error("Einforma Error: {message} {location}")]
    App {
        message: String,
        location: ErrorLocation,
    },

    /// Error from lookup-core (storage, configuration, relays)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },

    /// Rejected form input
    #[error("Input Error: {message} {location}")]
    Input {
        message: String,
        location: ErrorLocation,
    },

    /// Live mode selected without stored credentials
    #[error("Missing Credentials Error: {message} {location}")]
    MissingCredentials {
        message: String,
        location: ErrorLocation,
    },
}

impl AppError {
    #[track_caller]
    pub fn app(message: impl Into<String>) -> Self {
        AppError::App {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for AppError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        AppError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<StorageError> for AppError {
    #[track_caller]
    fn from(error: StorageError) -> Self {
        AppError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ModelError> for AppError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        AppError::Input {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DispatchError> for AppError {
    #[track_caller]
    fn from(error: DispatchError) -> Self {
        match error {
            DispatchError::MissingCredentials { message, location } => {
                AppError::MissingCredentials { message, location }
            }
        }
    }
}
