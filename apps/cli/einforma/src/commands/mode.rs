use super::write_out;
use crate::cli::ModeArg;
use crate::error::AppError;

use lookup_core::{LookupService, Notification, Notifier};
use models::DataMode;

use std::io::Write;

impl From<ModeArg> for DataMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Simulated => DataMode::Simulated,
            ModeArg::Live => DataMode::Live,
        }
    }
}

pub fn show(service: &LookupService, out: &mut dyn Write) -> Result<(), AppError> {
    let preferences = service.preferences();
    let credentials = if preferences.is_authenticated() {
        "stored"
    } else {
        "not stored"
    };

    write_out(
        out,
        &format!(
            "Data mode:   {}\nCredentials: {credentials}\n",
            preferences.data_mode()
        ),
    )
}

pub fn set(
    service: &LookupService,
    notifier: &dyn Notifier,
    mode: DataMode,
) -> Result<(), AppError> {
    service.preferences().set_data_mode(mode)?;

    notifier.notify(Notification::info(match mode {
        DataMode::Simulated => "Using simulated data for demonstration",
        DataMode::Live => "Trying the live API (requests go through CORS relays)",
    }));
    Ok(())
}
