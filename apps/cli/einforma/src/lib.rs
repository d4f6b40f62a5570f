// Library exports for testing
// The binary (main.rs) imports these as well

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod notifier;
pub mod views;

#[cfg(test)]
mod tests;

use crate::cli::Cli;
use crate::error::AppError;
use crate::notifier::TerminalNotifier;

use lookup_core::LookupService;
use lookup_core::config::default_data_dir;
use lookup_core::error::CoreError;

use std::fs::create_dir_all;
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;

use log::info;

/// Resolve the data directory: `--data-dir` / `EINFORMA_DATA_DIR`, else the platform default.
pub fn resolve_data_dir(cli: &Cli) -> Result<PathBuf, AppError> {
    match &cli.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(default_data_dir().map_err(CoreError::from)?),
    }
}

/// Open the service for the resolved data directory and run the parsed command.
///
/// `env_file` is the `.env` file loaded before parsing, if any.
pub async fn run(cli: Cli, env_file: Option<PathBuf>) -> Result<(), AppError> {
    let data_dir = resolve_data_dir(&cli)?;

    create_dir_all(&data_dir).map_err(|e| {
        AppError::app(format!(
            "Failed to create data directory {}: {e}",
            data_dir.display()
        ))
    })?;

    // Initialize logger FIRST
    logger::initialize(&data_dir, cli.verbose)?;
    info!("Data directory: {}", data_dir.display());
    if let Some(path) = env_file {
        info!("Loaded .env from: {}", path.display());
    }

    let notifier = Arc::new(TerminalNotifier::stderr());
    let service = LookupService::open(&data_dir, notifier.clone())?;

    commands::execute(cli.command, &service, notifier.as_ref(), &mut stdout().lock()).await
}
