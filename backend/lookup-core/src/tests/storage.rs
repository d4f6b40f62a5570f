use crate::error::StorageError;
use crate::storage::{check_quota, usage_after_write};

use std::collections::BTreeMap;

fn entries() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("alpha".to_string(), "12345".to_string()),
        ("beta".to_string(), "xyz".to_string()),
    ])
}

/// **VALUE**: Verifies that quota usage counts a replaced key once.
///
/// **WHY THIS MATTERS**: Overwriting a large value with a smaller one must not be
/// rejected as if both copies were stored.
///
/// **BUG THIS CATCHES**: Would catch summing the old value together with the new one.
#[test]
fn given_existing_key_when_usage_computed_then_old_value_excluded() {
    // GIVEN: alpha=12345 (10 bytes), beta=xyz (7 bytes)
    let entries = entries();

    // WHEN: Computing usage for new and replaced keys
    let replaced = usage_after_write(&entries, "alpha", "1");
    let added = usage_after_write(&entries, "gamma", "1");

    // THEN: Replaced key counted once
    assert_eq!(replaced, 7 + 6);
    assert_eq!(added, 10 + 7 + 6);
}

/// **VALUE**: Verifies the quota check rejects writes past the limit.
///
/// **WHY THIS MATTERS**: A full store must fail the write so the credential store
/// keeps its previous state.
///
/// **BUG THIS CATCHES**: Would catch an off-by-one that rejects a write exactly at the limit.
#[test]
fn given_quota_when_checking_writes_then_only_overflow_rejected() {
    // GIVEN: 17 bytes already used
    let entries = entries();

    // WHEN / THEN: A write landing exactly on the quota passes
    assert!(check_quota(&entries, "g", "12", Some(20)).is_ok());

    // WHEN / THEN: One byte more fails with the figures
    match check_quota(&entries, "g", "123", Some(20)) {
        Err(StorageError::QuotaExceeded {
            required, quota, ..
        }) => {
            assert_eq!(required, 21);
            assert_eq!(quota, 20);
        }
        other => panic!("Expected QuotaExceeded, got {other:?}"),
    }

    // WHEN / THEN: No quota means no limit
    assert!(check_quota(&entries, "g", &"x".repeat(1024), None).is_ok());
}
