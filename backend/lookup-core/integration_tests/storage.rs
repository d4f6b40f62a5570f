use lookup_core::error::StorageError;
use lookup_core::storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};

/// **VALUE**: Verifies that a missing storage file reads as an empty store.
///
/// **WHY THIS MATTERS**: First run has no file yet.
///
/// **BUG THIS CATCHES**: Would catch surfacing NotFound as a read error.
#[test]
fn given_missing_file_when_reading_then_empty() {
    // GIVEN: An empty directory
    let dir = tempfile::tempdir().unwrap();
    let store = FileKeyValueStore::open(dir.path());

    // WHEN / THEN: Reads succeed with nothing
    assert_eq!(store.get("anything").unwrap(), None);
    assert!(!store.path().exists());
}

/// **VALUE**: Verifies set, replace and remove against the file backend.
///
/// **WHY THIS MATTERS**: This is the persistence used by every CLI invocation.
///
/// **BUG THIS CATCHES**: Would catch a remove of an absent key failing, or a temp file left
/// behind after the atomic rename.
#[test]
fn given_file_store_when_writing_then_values_persist_atomically() {
    // GIVEN: A file store
    let dir = tempfile::tempdir().unwrap();
    let store = FileKeyValueStore::open(dir.path());

    // WHEN: Writing, replacing and removing
    store.set("a", "1").unwrap();
    store.set("a", "2").unwrap();
    store.set("b", "3").unwrap();
    store.remove("b").unwrap();
    store.remove("never-set").unwrap();

    // THEN: Only the replaced value remains, no temp file
    let reopened = FileKeyValueStore::open(dir.path());
    assert_eq!(reopened.get("a").unwrap().as_deref(), Some("2"));
    assert_eq!(reopened.get("b").unwrap(), None);
    assert!(!dir.path().join("storage.json.tmp").exists());
}

/// **VALUE**: Tests that a corrupt storage file is reported, not silently replaced.
///
/// **WHY THIS MATTERS**: Overwriting a corrupt file would destroy whatever is recoverable.
///
/// **BUG THIS CATCHES**: Would catch treating parse failures as an empty store.
#[test]
fn given_corrupt_file_when_reading_then_corrupt_error() {
    // GIVEN: Garbage in storage.json
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("storage.json"), "[1, 2").unwrap();
    let store = FileKeyValueStore::open(dir.path());

    // WHEN / THEN: Reads and writes report corruption
    assert!(matches!(store.get("a"), Err(StorageError::Corrupt { .. })));
    assert!(matches!(store.set("a", "1"), Err(StorageError::Corrupt { .. })));
}

/// **VALUE**: Verifies both backends reject writes over quota and keep their contents.
///
/// **WHY THIS MATTERS**: Mirrors browser local storage, where a full store throws and the
/// previous value survives.
///
/// **BUG THIS CATCHES**: Would catch writing first and checking the quota afterwards.
#[test]
fn given_quota_when_write_overflows_then_rejected_and_unchanged() {
    // GIVEN: Both backends with a 16 byte quota
    let dir = tempfile::tempdir().unwrap();
    let file = FileKeyValueStore::open(dir.path()).with_quota(Some(16));
    let memory = MemoryKeyValueStore::new().with_quota(16);
    let stores: Vec<&dyn KeyValueStore> = vec![&file, &memory];

    for store in stores {
        store.set("key", "value").unwrap();

        // WHEN: Replacing with a value that does not fit
        let result = store.set("key", "a much longer value");

        // THEN: QuotaExceeded and the old value remains
        match result {
            Err(StorageError::QuotaExceeded {
                key,
                required,
                quota,
                ..
            }) => {
                assert_eq!(key, "key");
                assert_eq!(required, 22);
                assert_eq!(quota, 16);
            }
            other => panic!("Expected QuotaExceeded, got {other:?}"),
        }
        assert_eq!(store.get("key").unwrap().as_deref(), Some("value"));
    }
}
