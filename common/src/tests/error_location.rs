use crate::ErrorLocation;
use std::panic::Location;

/// **VALUE**: Verifies that `ErrorLocation::from()` captures the calling file.
///
/// **WHY THIS MATTERS**: Every error in the workspace carries an ErrorLocation. If the
/// file is lost, storage and relay failures can no longer be traced to their origin.
///
/// **BUG THIS CATCHES**: Would catch if `Location::caller()` stops being propagated or the
/// file/column fields are swapped or zeroed.
#[test]
fn given_location_caller_when_error_location_created_then_captures_file_and_column() {
    // GIVEN / WHEN: Creating ErrorLocation from the current call site
    let location = ErrorLocation::from(Location::caller());

    // THEN: Should capture this test file and a real column
    assert!(
        location.file.contains("error_location.rs"),
        "Should capture file path"
    );
    assert!(location.line > 0, "Should capture line number");
    assert!(location.column > 0, "Should capture column number");
}

/// **VALUE**: Verifies the bracketed `[file:line:column]` display format.
///
/// **WHY THIS MATTERS**: Error messages printed by the CLI append this suffix; a format
/// change makes every error message harder to read.
///
/// **BUG THIS CATCHES**: Would catch if brackets or separators are dropped from Display.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    // GIVEN: An ErrorLocation
    let location = ErrorLocation::from(Location::caller());

    // WHEN: Formatting as string
    let formatted = location.to_string();

    // THEN: Should produce "[file:line:column]"
    assert!(formatted.starts_with('['));
    assert!(formatted.ends_with(']'));
    assert!(formatted.contains(&format!(":{}:{}", location.line, location.column)));
    assert_eq!(formatted.matches(':').count(), 2, "Should have exactly 2 colons");
}

/// **VALUE**: Verifies that `#[track_caller]` helpers report their caller's line.
///
/// **WHY THIS MATTERS**: Error constructors such as `StorageError::quota_exceeded()` rely on
/// `#[track_caller]` so the location points at the failing operation, not the constructor.
///
/// **BUG THIS CATCHES**: Would catch if location propagation breaks, making every error
/// report the same line.
#[test]
fn given_multiple_call_sites_when_capturing_location_then_each_has_unique_line() {
    // GIVEN: A helper that captures its caller
    #[track_caller]
    fn capture_location() -> ErrorLocation {
        ErrorLocation::from(Location::caller())
    }

    // WHEN: Capturing from two consecutive lines
    let first = capture_location();
    let second = capture_location();

    // THEN: Same file, sequential lines
    assert_eq!(first.file, second.file);
    assert_eq!(first.line + 1, second.line, "Lines should be sequential");
}
