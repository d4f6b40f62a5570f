//! Error types for relay delivery.
//!
//! Key design decisions:
//! - HTTP status codes stored directly (not parsed from strings)
//! - Every variant names the relay tier that failed
//! - `#[track_caller]` for automatic location capture

use crate::relay::RelayTier;

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TransportError {
    #[error("Relay '{relay}' answered HTTP {status_code}: {message} {location}")]
    Status {
        relay: RelayTier,
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Relay '{relay}' network error: {message} {location}")]
    Network {
        relay: RelayTier,
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("Relay Setup Error: {message} {location}")]
    Setup {
        message: String,
        location: ErrorLocation,
    },
}

impl TransportError {
    #[track_caller]
    pub fn setup(message: impl Into<String>) -> Self {
        TransportError::Setup {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from reqwest error with proper categorization.
    #[track_caller]
    pub fn from_reqwest(relay: RelayTier, error: &reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            return TransportError::Status {
                relay,
                status_code: HttpStatusCode(status.as_u16()),
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        TransportError::Network {
            relay,
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from a relay response with a non-success status.
    #[track_caller]
    pub fn from_http_response(relay: RelayTier, status_code: u16, body: impl Into<String>) -> Self {
        TransportError::Status {
            relay,
            status_code: HttpStatusCode(status_code),
            message: body.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Relay tier that produced this failure, if any request was sent.
    pub fn relay(&self) -> Option<RelayTier> {
        match self {
            TransportError::Status { relay, .. } => Some(*relay),
            TransportError::Network { relay, .. } => Some(*relay),
            TransportError::Setup { .. } => None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Status { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }

    /// Short category used in log lines.
    pub fn error_category(&self) -> &'static str {
        match self {
            TransportError::Status { status_code, .. } if status_code.is_relay_refusal() => {
                "relay_refused"
            }
            TransportError::Status { status_code, .. } if status_code.is_client_error() => {
                "client_error"
            }
            TransportError::Status { status_code, .. } if status_code.is_server_error() => {
                "server_error"
            }
            TransportError::Status { .. } => "unexpected_status",
            TransportError::Network { is_timeout: true, .. } => "timeout",
            TransportError::Network { is_connection: true, .. } => "connection",
            TransportError::Network { .. } => "network",
            TransportError::Setup { .. } => "setup",
        }
    }
}
