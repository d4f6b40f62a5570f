// Unit tests for logger module initialization logic
// Tests focus on idempotence and error handling

use crate::logger::initialize;

use std::path::PathBuf;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **WHY THIS MATTERS**: `run()` initializes the logger, and tests or embedding code may
/// call it again. A second global logger registration would otherwise panic.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed,
/// causing fern to fail when trying to set a global logger twice.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A valid temporary directory
    let temp_dir = tempfile::tempdir().unwrap();

    // WHEN: Calling initialize twice
    let result1 = initialize(temp_dir.path(), false);
    let result2 = initialize(temp_dir.path(), true);

    // THEN: Both should return Ok (second one logs warning but doesn't error)
    assert!(result1.is_ok(), "First initialization should succeed");
    assert!(
        result2.is_ok(),
        "Second initialization should succeed (idempotent)"
    );
}

/// **VALUE**: Verifies that an unusable log directory is reported, not a panic.
///
/// **WHY THIS MATTERS**: `--data-dir` comes from the user; a bad path must produce a
/// readable error and a non-zero exit.
///
/// **BUG THIS CATCHES**: Would catch if `fern::log_file()` failures were unwrapped.
///
/// **NOTE**: The logger guard is process-wide, so this only observes the error when it
/// runs first. Either outcome proves there is no panic.
#[test]
fn given_invalid_log_dir_when_initialize_called_then_no_panic() {
    // GIVEN: A path that cannot hold a file
    let invalid_dir = PathBuf::from("/dev/null/invalid-path");

    // WHEN: Calling initialize with invalid directory
    let result = initialize(&invalid_dir, false);

    // THEN: Either an App error (first call) or Ok (already initialized)
    if let Err(err) = result {
        let err_string = format!("{:?}", err);
        assert!(err_string.contains("App"), "Error should be AppError::App variant");
        assert!(err_string.contains("Failed to create log file"));
    }
}
