use einforma::cli::Cli;
use einforma::commands::execute;
use einforma::error::AppError;

use lookup_core::config::AppConfig;
use lookup_core::storage::{KeyValueStore, MemoryKeyValueStore};
use lookup_core::{LookupService, NotificationLevel, RecordingNotifier};

use models::DataMode;

use std::sync::Arc;

use clap::Parser;

const UNREACHABLE_RELAY: &str = "http://127.0.0.1:1/";

struct Fixture {
    _dir: tempfile::TempDir,
    service: LookupService,
    notifier: Arc<RecordingNotifier>,
}

fn fixture_with_store(store: Arc<dyn KeyValueStore>) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.relays.primary.url = UNREACHABLE_RELAY.to_string();
    config.relays.secondary.url = UNREACHABLE_RELAY.to_string();
    config.simulation.latency_ms = 5;

    let notifier = Arc::new(RecordingNotifier::new());
    let service = LookupService::with_store(dir.path(), config, store, notifier.clone()).unwrap();

    Fixture {
        _dir: dir,
        service,
        notifier,
    }
}

fn fixture() -> Fixture {
    fixture_with_store(Arc::new(MemoryKeyValueStore::new()))
}

async fn run(fixture: &Fixture, argv: &[&str]) -> (Result<(), AppError>, String) {
    let cli = Cli::try_parse_from(argv).unwrap();
    let mut out = Vec::new();
    let result = execute(
        cli.command,
        &fixture.service,
        fixture.notifier.as_ref(),
        &mut out,
    )
    .await;
    (result, String::from_utf8(out).unwrap())
}

/// **VALUE**: End to end: a default search prints the canned company.
///
/// **WHY THIS MATTERS**: This is the first thing a new user runs.
///
/// **BUG THIS CATCHES**: Would catch rendering before the cache is filled or requiring
/// credentials in simulated mode.
#[tokio::test]
async fn given_fresh_install_when_searching_then_simulated_company_printed() {
    // GIVEN: Nothing stored
    let f = fixture();

    // WHEN: Searching
    let (result, out) = run(&f, &["einforma", "search", "Acme", "--view", "overview"]).await;

    // THEN: Canned company overview and the other company listed
    result.unwrap();
    assert!(out.starts_with("Empresa Ejemplo S.L."));
    assert!(out.contains("== Overview =="));
    assert!(out.contains("Test Corporation Española S.A."));
    assert_eq!(f.notifier.levels(), vec![NotificationLevel::Success]);
}

/// **VALUE**: Verifies `--json` prints the cached result as provider-shaped JSON.
///
/// **WHY THIS MATTERS**: Scripts consume this output.
///
/// **BUG THIS CATCHES**: Would catch serializing with snake_case keys or dropping the query echo.
#[tokio::test]
async fn given_json_flag_when_searching_then_result_json_printed() {
    // GIVEN: Nothing stored
    let f = fixture();

    // WHEN: Searching with --json
    let (result, out) = run(&f, &["einforma", "search", "Acme", "--json"]).await;

    // THEN: Provider field names
    result.unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["query"]["q"], "Acme");
    assert_eq!(json["query"]["type"], "company");
    assert_eq!(json["results"][0]["foundationDate"], "2005-06-15");
    assert_eq!(json["results"][0]["financials"]["revenue"]["2021"], 1_250_000.0);
}

/// **VALUE**: Verifies a search rejected by form validation empties the result cache.
///
/// **WHY THIS MATTERS**: A long-lived service must not keep showing the previous company
/// after the user submitted an invalid search.
///
/// **BUG THIS CATCHES**: Would catch returning the input error while the old result stays cached.
#[tokio::test]
async fn given_previous_result_when_search_term_blank_then_input_error_and_cache_cleared() {
    // GIVEN: A completed search
    let f = fixture();
    let (first, _) = run(&f, &["einforma", "search", "Acme"]).await;
    first.unwrap();
    assert!(!f.service.cache().is_empty().await);

    // WHEN: Searching with a blank term
    let (result, out) = run(&f, &["einforma", "search", "   "]).await;

    // THEN: Input error, nothing printed, cache emptied
    assert!(matches!(result, Err(AppError::Input { .. })));
    assert!(out.is_empty());
    assert!(f.service.cache().is_empty().await);
}

/// **VALUE**: Verifies live mode without credentials fails the command.
///
/// **WHY THIS MATTERS**: The process must exit non-zero so scripts notice.
///
/// **BUG THIS CATCHES**: Would catch printing stale output and exiting successfully.
#[tokio::test]
async fn given_live_mode_without_credentials_when_searching_then_missing_credentials() {
    // GIVEN: Live mode, no credentials
    let f = fixture();
    run(&f, &["einforma", "mode", "live"]).await.0.unwrap();

    // WHEN: Searching
    let (result, out) = run(&f, &["einforma", "search", "Acme"]).await;

    // THEN: MissingCredentials and nothing printed
    assert!(matches!(result, Err(AppError::MissingCredentials { .. })));
    assert!(out.is_empty());
}

/// **VALUE**: Verifies live mode with unreachable relays still prints data.
///
/// **WHY THIS MATTERS**: Relay outages are not command failures.
///
/// **BUG THIS CATCHES**: Would catch transport errors leaking out as a non-zero exit.
#[tokio::test]
async fn given_live_mode_and_relays_down_when_searching_then_fallback_data_printed() {
    // GIVEN: Live mode with credentials and no reachable relay
    let f = fixture();
    run(&f, &["einforma", "mode", "live"]).await.0.unwrap();
    run(
        &f,
        &["einforma", "credentials", "set", "--client-id", "id", "--client-secret", "secret"],
    )
    .await
    .0
    .unwrap();

    // WHEN: Searching
    let (result, out) = run(&f, &["einforma", "search", "Acme", "--view", "details"]).await;

    // THEN: Success with canned data, failure then fallback notices
    result.unwrap();
    assert!(out.contains("== Details =="));
    assert!(out.contains("B12345678"));
    let levels = f.notifier.levels();
    assert_eq!(
        &levels[levels.len() - 3..],
        &[
            NotificationLevel::Error,
            NotificationLevel::Info,
            NotificationLevel::Success
        ]
    );
}

/// **VALUE**: Verifies credential management through the CLI, secret never printed.
///
/// **WHY THIS MATTERS**: `credentials show` output ends up in terminals and screenshots.
///
/// **BUG THIS CATCHES**: Would catch printing the secret or a clear that leaves it stored.
#[tokio::test]
async fn given_credentials_when_set_shown_and_cleared_then_secret_never_printed() {
    // GIVEN: Stored credentials
    let f = fixture();
    run(
        &f,
        &["einforma", "credentials", "set", "--client-id", "my-id", "--client-secret", "hunter2"],
    )
    .await
    .0
    .unwrap();

    // WHEN: Showing them
    let (_, shown) = run(&f, &["einforma", "credentials", "show"]).await;

    // THEN: Id shown, secret redacted
    assert!(shown.contains("my-id"));
    assert!(!shown.contains("hunter2"));

    // WHEN: Clearing and showing again
    run(&f, &["einforma", "credentials", "clear"]).await.0.unwrap();
    let (_, cleared) = run(&f, &["einforma", "credentials", "show"]).await;

    // THEN: Nothing stored
    assert_eq!(cleared, "No API credentials stored\n");
    assert_eq!(
        f.notifier.levels(),
        vec![NotificationLevel::Success, NotificationLevel::Info]
    );
}

/// **VALUE**: Tests that blank credentials are rejected before touching storage.
///
/// **WHY THIS MATTERS**: An empty secret would be restored on every start as a
/// half-configured account.
///
/// **BUG THIS CATCHES**: Would catch skipping `Credentials::new` validation.
#[tokio::test]
async fn given_blank_secret_when_setting_credentials_then_input_error() {
    // GIVEN: A fresh install
    let f = fixture();

    // WHEN: Setting a blank secret
    let (result, _) = run(
        &f,
        &["einforma", "credentials", "set", "--client-id", "id", "--client-secret", " "],
    )
    .await;

    // THEN: Input error, error notification, nothing stored
    assert!(matches!(result, Err(AppError::Input { .. })));
    assert_eq!(f.notifier.levels(), vec![NotificationLevel::Error]);
    assert!(!f.service.preferences().is_authenticated());
}

/// **VALUE**: Verifies a full store fails `credentials set` with a Core error.
///
/// **WHY THIS MATTERS**: Storage failures must exit non-zero with a message.
///
/// **BUG THIS CATCHES**: Would catch reporting success after a rejected write.
#[tokio::test]
async fn given_full_store_when_setting_credentials_then_core_error_and_failure_notice() {
    // GIVEN: A store too small for any credentials
    let f = fixture_with_store(Arc::new(MemoryKeyValueStore::new().with_quota(8)));

    // WHEN: Setting credentials
    let (result, _) = run(
        &f,
        &["einforma", "credentials", "set", "--client-id", "id", "--client-secret", "secret"],
    )
    .await;

    // THEN: Core error, failure notice
    assert!(matches!(result, Err(AppError::Core { .. })));
    assert_eq!(f.notifier.notifications()[0].message, "Failed to store API credentials");
}

/// **VALUE**: Verifies `mode` shows and persists the data mode.
///
/// **WHY THIS MATTERS**: The mode decides whether searches hit the network.
///
/// **BUG THIS CATCHES**: Would catch a mode switch that is only kept in memory.
#[tokio::test]
async fn given_mode_commands_when_run_then_mode_persisted_and_shown() {
    // GIVEN: A fresh install
    let f = fixture();

    // WHEN: Showing, then switching to live
    let (_, before) = run(&f, &["einforma", "mode"]).await;
    run(&f, &["einforma", "mode", "live"]).await.0.unwrap();
    let (_, after) = run(&f, &["einforma", "mode"]).await;

    // THEN: Simulated, then live
    assert!(before.contains("Data mode:   simulated"));
    assert!(after.contains("Data mode:   live"));
    assert_eq!(f.service.preferences().data_mode(), DataMode::Live);
}
