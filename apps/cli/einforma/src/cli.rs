use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Look up Spanish companies through the einforma API.
#[derive(Parser, Debug)]
#[command(name = "einforma")]
#[command(about = "Company lookups against einforma, live or simulated")]
#[command(version)]
pub struct Cli {
    /// Directory holding storage.json, config.json and einforma.log
    #[arg(long, global = true, env = "EINFORMA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Print debug logs to the terminal
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage the stored API credentials
    #[command(subcommand)]
    Credentials(CredentialsCommand),

    /// Show or change the data mode
    Mode {
        #[arg(value_enum)]
        mode: Option<ModeArg>,
    },

    /// Search for a company
    Search(SearchArgs),
}

#[derive(Subcommand, Debug)]
pub enum CredentialsCommand {
    /// Store a client id and secret
    Set {
        #[arg(long)]
        client_id: String,

        #[arg(long, env = "EINFORMA_CLIENT_SECRET", hide_env_values = true)]
        client_secret: String,
    },

    /// Show the stored client id (the secret stays hidden)
    Show,

    /// Forget the stored credentials
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Simulated,
    Live,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Company name, CIF or person to search for
    pub term: String,

    /// Query type: company, person, financial or legal
    #[arg(long = "type", default_value = "company")]
    pub kind: String,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub sector: Option<String>,

    #[arg(long, value_enum, default_value_t = View::All)]
    pub view: View,

    /// Print the raw result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    Overview,
    Financials,
    Details,
    All,
}
