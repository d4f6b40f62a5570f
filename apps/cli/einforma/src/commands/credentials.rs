use super::write_out;
use crate::error::AppError;

use lookup_core::{LookupService, Notification, Notifier};
use models::Credentials;

use std::io::Write;

use log::error;

pub fn set(
    service: &LookupService,
    notifier: &dyn Notifier,
    client_id: String,
    client_secret: String,
) -> Result<(), AppError> {
    let credentials = Credentials::new(client_id, client_secret).inspect_err(|_| {
        notifier.notify(Notification::error(
            "Please enter both the Client ID and the Client Secret",
        ))
    })?;

    service.preferences().set(credentials).map_err(|e| {
        error!("Storing credentials failed: {e}");
        notifier.notify(Notification::error("Failed to store API credentials"));
        AppError::from(e)
    })?;

    notifier.notify(Notification::success("API credentials stored successfully"));
    Ok(())
}

pub fn show(service: &LookupService, out: &mut dyn Write) -> Result<(), AppError> {
    let text = match service.preferences().get() {
        Some(credentials) => format!(
            "Client ID:     {}\nClient secret: {}\n",
            credentials.client_id(),
            credentials.client_secret()
        ),
        None => "No API credentials stored\n".to_string(),
    };

    write_out(out, &text)
}

pub fn clear(service: &LookupService, notifier: &dyn Notifier) -> Result<(), AppError> {
    service.preferences().clear()?;
    notifier.notify(Notification::info("API credentials cleared"));
    Ok(())
}
