use lookup_core::CredentialStore;
use lookup_core::credential_store::{CREDENTIALS_KEY, DATA_MODE_KEY};
use lookup_core::error::StorageError;
use lookup_core::storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};

use common::ErrorLocation;

use models::{Credentials, DataMode};

use std::panic::Location;
use std::path::PathBuf;
use std::sync::Arc;

fn memory_store() -> Arc<MemoryKeyValueStore> {
    Arc::new(MemoryKeyValueStore::new())
}

/// Memory store whose removals are always rejected.
struct RejectingRemoveStore {
    inner: MemoryKeyValueStore,
}

impl KeyValueStore for RejectingRemoveStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value)
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: PathBuf::from("storage.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

/// **VALUE**: Verifies that a fresh install runs in simulated mode.
///
/// **WHY THIS MATTERS**: Users without credentials must get working demo data instead of
/// a failed live query.
///
/// **BUG THIS CATCHES**: Would catch defaulting to live mode when `useMockData` is absent.
#[test]
fn given_empty_store_when_reading_mode_then_simulated() {
    // GIVEN: Nothing persisted
    let preferences = CredentialStore::open(memory_store());

    // WHEN: Reading the mode
    let mode = preferences.data_mode();

    // THEN: Simulated
    assert_eq!(mode, DataMode::Simulated);
    assert!(preferences.use_simulated_data());
    assert!(!preferences.is_authenticated());
}

/// **VALUE**: Verifies that the data mode persists as the `useMockData` JSON boolean.
///
/// **WHY THIS MATTERS**: The stored layout is shared with existing installations.
///
/// **BUG THIS CATCHES**: Would catch storing `"live"` instead of `false`.
#[test]
fn given_live_mode_when_set_then_persisted_as_false() {
    // GIVEN: A fresh store
    let store = memory_store();
    let preferences = CredentialStore::open(store.clone());

    // WHEN: Switching to live
    preferences.set_data_mode(DataMode::Live).unwrap();

    // THEN: Mode reads back and the raw value is `false`
    assert_eq!(preferences.data_mode(), DataMode::Live);
    assert_eq!(store.get(DATA_MODE_KEY).unwrap().as_deref(), Some("false"));
}

/// **VALUE**: Tests that an unreadable mode value falls back to simulated.
///
/// **WHY THIS MATTERS**: A hand-edited storage file must not break searching.
///
/// **BUG THIS CATCHES**: Would catch propagating the JSON error or treating garbage as live.
#[test]
fn given_malformed_mode_value_when_reading_mode_then_simulated() {
    // GIVEN: A non-boolean value
    let store = memory_store();
    store.set(DATA_MODE_KEY, "\"maybe\"").unwrap();
    let preferences = CredentialStore::open(store);

    // WHEN / THEN: Simulated
    assert_eq!(preferences.data_mode(), DataMode::Simulated);
}

/// **VALUE**: Verifies the credential round trip: set, get, reopen, clear.
///
/// **WHY THIS MATTERS**: Credentials must survive a restart and disappear completely when
/// cleared.
///
/// **BUG THIS CATCHES**: Would catch a clear that only empties memory and leaves the
/// persisted entry to be restored on the next start.
#[test]
fn given_credentials_when_set_reopened_and_cleared_then_round_trip_holds() {
    // GIVEN: A store and credentials
    let store = memory_store();
    let preferences = CredentialStore::open(store.clone());
    let credentials = Credentials::new("client-1", "s3cret").unwrap();

    // WHEN: Setting them
    preferences.set(credentials.clone()).unwrap();

    // THEN: Active and persisted in the shared layout
    assert_eq!(preferences.get(), Some(credentials.clone()));
    assert!(preferences.is_authenticated());
    let raw = store.get(CREDENTIALS_KEY).unwrap().unwrap();
    let persisted: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted["clientId"], "client-1");
    assert_eq!(persisted["clientSecret"], "s3cret");

    // WHEN: Reopening over the same storage
    let reopened = CredentialStore::open(store.clone());

    // THEN: Restored
    assert_eq!(reopened.get(), Some(credentials));

    // WHEN: Clearing twice
    reopened.clear().unwrap();
    reopened.clear().unwrap();

    // THEN: Gone from memory and storage
    assert_eq!(reopened.get(), None);
    assert!(!reopened.is_authenticated());
    assert_eq!(store.get(CREDENTIALS_KEY).unwrap(), None);
}

/// **VALUE**: Tests that malformed persisted credentials are discarded and removed.
///
/// **WHY THIS MATTERS**: A corrupt entry would otherwise fail every start.
///
/// **BUG THIS CATCHES**: Would catch restoring empty credentials or leaving the bad entry
/// in storage.
#[test]
fn given_malformed_persisted_credentials_when_opened_then_absent_and_removed() {
    // GIVEN: Invalid JSON and empty fields
    let malformed_cases = vec![
        "{not json",
        r#"{"clientId":"","clientSecret":"x"}"#,
        r#"{"clientId":"id"}"#,
    ];

    for malformed in malformed_cases {
        let store = memory_store();
        store.set(CREDENTIALS_KEY, malformed).unwrap();

        // WHEN: Opening the credential store
        let preferences = CredentialStore::open(store.clone());

        // THEN: No credentials and the entry is gone
        assert_eq!(preferences.get(), None, "Should discard: {malformed}");
        assert_eq!(store.get(CREDENTIALS_KEY).unwrap(), None);
    }
}

/// **VALUE**: Verifies that a rejected write leaves the active credentials unchanged.
///
/// **WHY THIS MATTERS**: After a failed save the user must keep working with the pair that
/// is actually persisted.
///
/// **BUG THIS CATCHES**: Would catch updating the in-memory pair before the write succeeds.
#[test]
fn given_full_store_when_setting_credentials_then_error_and_previous_pair_kept() {
    // GIVEN: A small quota and stored credentials
    let store = Arc::new(MemoryKeyValueStore::new().with_quota(96));
    let preferences = CredentialStore::open(store.clone());
    let original = Credentials::new("id", "secret").unwrap();
    preferences.set(original.clone()).unwrap();

    // WHEN: Storing a pair that does not fit
    let oversized = Credentials::new("id", "x".repeat(512)).unwrap();
    let result = preferences.set(oversized);

    // THEN: Quota error and nothing changed
    assert!(matches!(result, Err(StorageError::QuotaExceeded { .. })));
    assert_eq!(preferences.get(), Some(original.clone()));
    let reopened = CredentialStore::open(store);
    assert_eq!(reopened.get(), Some(original));
}

/// **VALUE**: Verifies that credentials written to disk are restored by a new process.
///
/// **WHY THIS MATTERS**: The CLI opens a new store on every invocation.
///
/// **BUG THIS CATCHES**: Would catch a file store that never flushes or reads a different path.
#[test]
fn given_file_store_when_credentials_set_then_restored_from_disk() {
    // GIVEN: A data directory
    let dir = tempfile::tempdir().unwrap();
    let credentials = Credentials::new("file-client", "file-secret").unwrap();

    // WHEN: Setting credentials and mode through one store
    let first = CredentialStore::open(Arc::new(FileKeyValueStore::open(dir.path())));
    first.set(credentials.clone()).unwrap();
    first.set_data_mode(DataMode::Live).unwrap();

    // THEN: A second store over the same directory sees both
    let second = CredentialStore::open(Arc::new(FileKeyValueStore::open(dir.path())));
    assert_eq!(second.get(), Some(credentials));
    assert_eq!(second.data_mode(), DataMode::Live);
}

/// **VALUE**: Verifies that a rejected removal leaves the active credentials in place.
///
/// **WHY THIS MATTERS**: The persisted pair survives a failed clear and comes back on the
/// next start; the running session must agree with what is stored.
///
/// **BUG THIS CATCHES**: Would catch emptying the in-memory slot before the store accepted
/// the removal.
#[test]
fn given_store_rejecting_removal_when_clearing_then_error_and_credentials_kept() {
    // GIVEN: Stored credentials in a store that refuses removals
    let credentials = Credentials::new("kept-client", "kept-secret").unwrap();
    let store = Arc::new(RejectingRemoveStore {
        inner: MemoryKeyValueStore::new(),
    });
    let preferences = CredentialStore::open(store.clone());
    preferences.set(credentials.clone()).unwrap();

    // WHEN: Clearing
    let result = preferences.clear();

    // THEN: Write error, pair still active and still persisted
    assert!(matches!(result, Err(StorageError::Write { .. })));
    assert_eq!(preferences.get(), Some(credentials));
    assert!(preferences.is_authenticated());
    assert!(store.get(CREDENTIALS_KEY).unwrap().is_some());
}
