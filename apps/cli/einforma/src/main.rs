use einforma::cli::{Cli, Command};
use einforma::run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let env_file = load_dotenv();

    let cli = Cli::parse();
    let json_output = matches!(&cli.command, Command::Search(args) if args.json);

    match run(cli, env_file).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json_output {
                match serde_json::to_string_pretty(&e) {
                    Ok(json) => println!("{json}"),
                    Err(_) => eprintln!("error: {e}"),
                }
            } else {
                eprintln!("error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Load `.env` from the current directory, then from the executable's directory.
///
/// Returns the file that was loaded so it can be logged once the logger exists.
fn load_dotenv() -> Option<PathBuf> {
    if let Ok(path) = dotenvy::dotenv() {
        return Some(path);
    }

    let env_path = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(".env")))
        .filter(|path| path.exists())?;

    match dotenvy::from_path(&env_path) {
        Ok(()) => Some(env_path),
        Err(e) => {
            eprintln!("warning: failed to parse .env at {}: {e}", env_path.display());
            None
        }
    }
}
