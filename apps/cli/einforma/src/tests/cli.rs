use crate::cli::{Cli, Command, CredentialsCommand, ModeArg, View};
use crate::commands::search::build_parameters;

use clap::Parser;

fn search_args(argv: &[&str]) -> crate::cli::SearchArgs {
    match Cli::try_parse_from(argv).unwrap().command {
        Command::Search(args) => args,
        other => panic!("Expected search, got {other:?}"),
    }
}

/// **VALUE**: Verifies search defaults: company type, every view, text output.
///
/// **WHY THIS MATTERS**: `einforma search Acme` is the common invocation.
///
/// **BUG THIS CATCHES**: Would catch a default that hides sections or sends an empty type.
#[test]
fn given_bare_search_when_parsed_then_defaults_applied() {
    // WHEN: Parsing a bare search
    let args = search_args(&["einforma", "search", "Acme"]);

    // THEN: Defaults
    assert_eq!(args.term, "Acme");
    assert_eq!(args.kind, "company");
    assert_eq!(args.view, View::All);
    assert!(!args.json);

    let params = build_parameters(&args).unwrap();
    assert_eq!(params.pairs(), vec![("q", "Acme"), ("type", "company")]);
}

/// **VALUE**: Verifies filters flow into the query parameters and blanks are dropped.
///
/// **WHY THIS MATTERS**: `--sector ""` from a script must not become `sector=`.
///
/// **BUG THIS CATCHES**: Would catch passing raw CLI strings straight to the dispatcher.
#[test]
fn given_filters_when_building_parameters_then_blank_filters_dropped() {
    // GIVEN: A location and a blank sector
    let args = search_args(&[
        "einforma", "search", "Acme", "--type", "legal", "--location", "Madrid", "--sector", " ",
        "--view", "financials",
    ]);

    // WHEN: Building parameters
    let params = build_parameters(&args).unwrap();

    // THEN: Blank sector gone
    assert_eq!(args.view, View::Financials);
    assert_eq!(
        params.pairs(),
        vec![("q", "Acme"), ("type", "legal"), ("location", "Madrid")]
    );
}

/// **VALUE**: Tests that the form rejects a blank term and an unknown type.
///
/// **WHY THIS MATTERS**: Both would otherwise reach the provider as a useless query.
///
/// **BUG THIS CATCHES**: Would catch skipping the builder validation.
#[test]
fn given_invalid_search_input_when_building_parameters_then_input_errors() {
    // GIVEN / WHEN / THEN: Blank term
    let blank = search_args(&["einforma", "search", "   "]);
    assert!(build_parameters(&blank).is_err());

    // GIVEN / WHEN / THEN: Unknown type
    let unknown = search_args(&["einforma", "search", "Acme", "--type", "planet"]);
    assert!(build_parameters(&unknown).is_err());
}

/// **VALUE**: Verifies the credentials and mode subcommands parse.
///
/// **WHY THIS MATTERS**: These are the only ways to leave simulated mode.
///
/// **BUG THIS CATCHES**: Would catch renamed flags breaking documented usage.
#[test]
fn given_credentials_and_mode_commands_when_parsed_then_expected_variants() {
    // WHEN: Parsing credentials set with a global data dir after the subcommand
    let cli = Cli::try_parse_from([
        "einforma",
        "credentials",
        "set",
        "--client-id",
        "id",
        "--client-secret",
        "secret",
        "--data-dir",
        "/tmp/einforma-test",
    ])
    .unwrap();

    // THEN: Set with both values and the data dir
    assert!(matches!(
        cli.command,
        Command::Credentials(CredentialsCommand::Set { ref client_id, ref client_secret })
            if client_id == "id" && client_secret == "secret"
    ));
    assert_eq!(cli.data_dir.unwrap().to_str(), Some("/tmp/einforma-test"));

    // WHEN / THEN: Mode with and without a value
    let set_mode = Cli::try_parse_from(["einforma", "mode", "live"]).unwrap();
    assert!(matches!(set_mode.command, Command::Mode { mode: Some(ModeArg::Live) }));
    let show_mode = Cli::try_parse_from(["einforma", "mode"]).unwrap();
    assert!(matches!(show_mode.command, Command::Mode { mode: None }));

    // WHEN / THEN: Unknown mode rejected
    assert!(Cli::try_parse_from(["einforma", "mode", "offline"]).is_err());
}
