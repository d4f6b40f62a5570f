use lookup_core::config::{
    AppConfig, ENV_PRIMARY_RELAY_URL, ENV_PROVIDER_URL, ENV_SECONDARY_RELAY_URL,
    ENV_SIMULATED_LATENCY_MS,
};
use lookup_core::error::ConfigError;
use lookup_core::{PRIMARY_RELAY_URL, PROVIDER_BASE_URL, SECONDARY_RELAY_URL};

use serial_test::serial;

const ALL_OVERRIDES: [&str; 4] = [
    ENV_PRIMARY_RELAY_URL,
    ENV_SECONDARY_RELAY_URL,
    ENV_PROVIDER_URL,
    ENV_SIMULATED_LATENCY_MS,
];

fn clear_overrides() {
    for variable in ALL_OVERRIDES {
        // SAFETY: env-mutating tests run under #[serial]
        unsafe { std::env::remove_var(variable) };
    }
}

/// **VALUE**: Verifies the defaults used when no config file exists.
///
/// **WHY THIS MATTERS**: Most installs never write a config file.
///
/// **BUG THIS CATCHES**: Would catch a missing default for the relays or the latency.
#[test]
fn given_missing_config_when_loaded_then_defaults() {
    // GIVEN: An empty directory
    let dir = tempfile::tempdir().unwrap();

    // WHEN: Loading
    let config = AppConfig::load(dir.path()).unwrap();

    // THEN: Built-in relays, provider and latency
    assert_eq!(config.relays.primary.url, PRIMARY_RELAY_URL);
    assert_eq!(config.relays.primary.target_param, None);
    assert_eq!(config.relays.secondary.url, SECONDARY_RELAY_URL);
    assert_eq!(config.relays.secondary.target_param.as_deref(), Some("url"));
    assert_eq!(config.relays.request_timeout_secs, None);
    assert_eq!(config.provider.base_url, PROVIDER_BASE_URL);
    assert_eq!(config.simulation.latency_ms, 1500);
    assert_eq!(config.storage.quota_bytes, 5 * 1024 * 1024);
}

/// **VALUE**: Verifies save then load preserves every field.
///
/// **WHY THIS MATTERS**: Users edit relays through the file; a lossy save would reset them.
///
/// **BUG THIS CATCHES**: Would catch a field missing `Serialize` or its serde default shadowing
/// the saved value.
#[test]
fn given_custom_config_when_saved_and_loaded_then_identical() {
    // GIVEN: A customised config
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.relays.primary.url = "https://relay.example.com/fetch".to_string();
    config.relays.primary.target_param = Some("target".to_string());
    config.relays.request_timeout_secs = Some(20);
    config.simulation.latency_ms = 10;

    // WHEN: Saving and loading
    config.save(dir.path()).unwrap();
    let loaded = AppConfig::load(dir.path()).unwrap();

    // THEN: Same values
    assert_eq!(loaded.relays.primary, config.relays.primary);
    assert_eq!(loaded.relays.request_timeout_secs, Some(20));
    assert_eq!(loaded.simulation.latency_ms, 10);
}

/// **VALUE**: Tests that a partial config file keeps defaults for omitted sections.
///
/// **WHY THIS MATTERS**: Hand-written files usually contain one or two settings.
///
/// **BUG THIS CATCHES**: Would catch a section missing `#[serde(default)]`.
#[test]
fn given_partial_config_when_loaded_then_missing_fields_defaulted() {
    // GIVEN: Only a latency setting
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"simulation": {"latency_ms": 0}}"#,
    )
    .unwrap();

    // WHEN: Loading
    let config = AppConfig::load(dir.path()).unwrap();

    // THEN: Latency from file, everything else default
    assert_eq!(config.simulation.latency_ms, 0);
    assert_eq!(config.relays.primary.url, PRIMARY_RELAY_URL);
    assert_eq!(config.version, 1);
}

/// **VALUE**: Tests that invalid and corrupt config files are rejected.
///
/// **WHY THIS MATTERS**: A relay typo should fail at startup with the offending field named.
///
/// **BUG THIS CATCHES**: Would catch accepting non-HTTP relay URLs or empty parameter names.
#[test]
fn given_invalid_config_files_when_loaded_then_errors() {
    // GIVEN: One broken file per case
    let cases = vec![
        ("{not json", "Parse"),
        (r#"{"relays": {"primary": {"url": "ftp://relay"}}}"#, "Validation"),
        (r#"{"relays": {"secondary": {"url": "https://r", "target_param": " "}}}"#, "Validation"),
        (r#"{"version": 99}"#, "Validation"),
        (r#"{"storage": {"quota_bytes": 0}}"#, "Validation"),
        (r#"{"relays": {"request_timeout_secs": 0}}"#, "Validation"),
    ];

    for (contents, expected) in cases {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), contents).unwrap();

        // WHEN: Loading
        let err = AppConfig::load(dir.path()).unwrap_err();

        // THEN: The matching error kind
        let matched = match err {
            ConfigError::ParseError { .. } => "Parse",
            ConfigError::ValidationError { .. } => "Validation",
            _ => "other",
        };
        assert_eq!(matched, expected, "Unexpected error for: {contents}");
    }
}

/// **VALUE**: Verifies environment overrides win over file values.
///
/// **WHY THIS MATTERS**: Tests and CI point relays at local mocks through the environment.
///
/// **BUG THIS CATCHES**: Would catch an override read but never applied.
#[test]
#[serial]
fn given_env_overrides_when_applied_then_config_updated() {
    // GIVEN: Every override set
    clear_overrides();
    // SAFETY: serialized test
    unsafe {
        std::env::set_var(ENV_PRIMARY_RELAY_URL, "http://127.0.0.1:9001/p");
        std::env::set_var(ENV_SECONDARY_RELAY_URL, "http://127.0.0.1:9002/s");
        std::env::set_var(ENV_PROVIDER_URL, "http://127.0.0.1:9003/companies");
        std::env::set_var(ENV_SIMULATED_LATENCY_MS, " 25 ");
    }
    let mut config = AppConfig::default();

    // WHEN: Applying overrides
    let result = config.apply_env_overrides();
    clear_overrides();

    // THEN: Every field replaced
    result.unwrap();
    assert_eq!(config.relays.primary.url, "http://127.0.0.1:9001/p");
    assert_eq!(config.relays.secondary.url, "http://127.0.0.1:9002/s");
    assert_eq!(config.provider.base_url, "http://127.0.0.1:9003/companies");
    assert_eq!(config.simulation.latency_ms, 25);
}

/// **VALUE**: Tests that malformed overrides are reported with the variable name.
///
/// **WHY THIS MATTERS**: A silently ignored override makes tests hit public relays.
///
/// **BUG THIS CATCHES**: Would catch swallowing parse errors or skipping validation after
/// overrides.
#[test]
#[serial]
fn given_malformed_env_overrides_when_applied_then_errors() {
    // GIVEN: A non-numeric latency
    clear_overrides();
    // SAFETY: serialized test
    unsafe { std::env::set_var(ENV_SIMULATED_LATENCY_MS, "fast") };

    // WHEN: Applying overrides
    let latency_result = AppConfig::default().apply_env_overrides();
    clear_overrides();

    // THEN: EnvOverride naming the variable
    match latency_result {
        Err(ConfigError::EnvOverride { variable, .. }) => {
            assert_eq!(variable, ENV_SIMULATED_LATENCY_MS);
        }
        other => panic!("Expected EnvOverride, got {other:?}"),
    }

    // GIVEN: A relay override that is not a URL
    // SAFETY: serialized test
    unsafe { std::env::set_var(ENV_PRIMARY_RELAY_URL, "not a url") };

    // WHEN: Applying overrides
    let relay_result = AppConfig::default().apply_env_overrides();
    clear_overrides();

    // THEN: Validation rejects it
    assert!(matches!(relay_result, Err(ConfigError::ValidationError { .. })));
}
