use crate::{ErrorLocation, ModelError};

use common::RedactedSecret;

use std::panic::Location;

/// Client identifier/secret pair used for Basic authentication against the provider.
///
/// The pair is opaque: beyond non-emptiness nothing about its structure is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: RedactedSecret,
}

impl Credentials {
    /// Create a credential pair, rejecting blank fields.
    ///
    /// Surrounding whitespace is trimmed from the client id only; secrets are kept verbatim.
    #[track_caller]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let client_id = client_id.into().trim().to_string();
        let client_secret = RedactedSecret::new(client_secret.into());

        if client_id.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Client ID cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if client_secret.as_str().trim().is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Client secret cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            client_id,
            client_secret,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &RedactedSecret {
        &self.client_secret
    }
}
