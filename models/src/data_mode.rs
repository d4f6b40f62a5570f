use crate::{ErrorLocation, ModelError};

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

/// Whether queries are answered from the canned dataset or sent to the provider.
///
/// Defaults to [`DataMode::Simulated`] so a first run never touches the network
/// without an explicit opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataMode {
    #[default]
    Simulated,
    Live,
}

impl DataMode {
    /// Map the persisted `useMockData` flag onto a mode.
    pub fn from_use_mock_data(use_mock_data: bool) -> Self {
        if use_mock_data {
            DataMode::Simulated
        } else {
            DataMode::Live
        }
    }

    /// The persisted `useMockData` flag for this mode.
    pub fn use_mock_data(&self) -> bool {
        matches!(self, DataMode::Simulated)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataMode::Simulated => "simulated",
            DataMode::Live => "live",
        }
    }
}

impl fmt::Display for DataMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataMode {
    type Err = ModelError;

    #[track_caller]
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "simulated" | "mock" => Ok(DataMode::Simulated),
            "live" | "real" => Ok(DataMode::Live),
            other => Err(ModelError::Parse {
                message: format!("Unknown data mode '{other}' (expected simulated or live)"),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
