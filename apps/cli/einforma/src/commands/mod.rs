pub mod credentials;
pub mod mode;
pub mod search;

use crate::cli::{Command, CredentialsCommand};
use crate::error::AppError;

use lookup_core::{LookupService, Notifier};

use std::io::Write;

/// Run one CLI command against an open service, printing results to `out`.
pub async fn execute(
    command: Command,
    service: &LookupService,
    notifier: &dyn Notifier,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    match command {
        Command::Credentials(CredentialsCommand::Set {
            client_id,
            client_secret,
        }) => credentials::set(service, notifier, client_id, client_secret),
        Command::Credentials(CredentialsCommand::Show) => credentials::show(service, out),
        Command::Credentials(CredentialsCommand::Clear) => credentials::clear(service, notifier),
        Command::Mode { mode: None } => mode::show(service, out),
        Command::Mode { mode: Some(mode) } => mode::set(service, notifier, mode.into()),
        Command::Search(args) => search::run(service, args, out).await,
    }
}

#[track_caller]
pub(crate) fn write_out(out: &mut dyn Write, text: &str) -> Result<(), AppError> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| AppError::app(format!("Failed to write output: {e}")))
}
