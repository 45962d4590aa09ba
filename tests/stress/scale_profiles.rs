//! Scale test: large profile sets and cascade deletion.
//!
//! Validates that cascade deletion removes every profile on a heavily
//! profiled subject and nothing else.

use identity_ledger::{Address, IdentityRecord, OpenCreateStore, ProfileRecord, StoreConfig};

#[test]
fn stress_10k_profilers_cascade() {
    let operator = Address::random();
    let subject = Address::random();
    let mut store = OpenCreateStore::new(StoreConfig::new("Scale", "SCL"), operator);
    store
        .create_token(&operator, subject, IdentityRecord::new("popular", "", 0, 0))
        .unwrap();

    let profilers: Vec<Address> = (0..10_000).map(|_| Address::random()).collect();
    for (i, profiler) in profilers.iter().enumerate() {
        store
            .create_profile(profiler, subject, ProfileRecord::new("p", "", i as u64, 0))
            .expect("profile should succeed");
    }
    assert_eq!(store.list_profiles(&subject).len(), 10_000);
    assert_eq!(store.profile_count(), 10_000);

    store.delete_token(&operator, subject).unwrap();

    assert_eq!(store.profile_count(), 0);
    for profiler in profilers.iter().step_by(97) {
        assert!(!store.profile_exists(profiler, &subject));
    }
}

#[test]
fn stress_10k_subjects_each_profiled() {
    let operator = Address::random();
    let profiler = Address::random();
    let mut store = OpenCreateStore::new(StoreConfig::new("Scale", "SCL"), operator);

    let subjects: Vec<Address> = (0..10_000).map(|_| Address::random()).collect();
    for (i, subject) in subjects.iter().enumerate() {
        store
            .create_token(&operator, *subject, IdentityRecord::new(format!("s{i}"), "", 0, 0))
            .unwrap();
        store
            .create_profile(&profiler, *subject, ProfileRecord::new("seen", "", 1, 0))
            .unwrap();
    }
    assert_eq!(store.len(), 10_000);

    // Delete every other subject.
    for subject in subjects.iter().step_by(2) {
        store.delete_token(&operator, *subject).unwrap();
    }
    assert_eq!(store.len(), 5_000);
    assert_eq!(store.profile_count(), 5_000);

    for (i, subject) in subjects.iter().enumerate() {
        assert_eq!(store.profile_exists(&profiler, subject), i % 2 == 1);
    }
}

#[test]
fn stress_interleaved_profile_churn() {
    let operator = Address::random();
    let subject = Address::random();
    let mut store = OpenCreateStore::new(StoreConfig::new("Churn", "CHN"), operator);
    store
        .create_token(&operator, subject, IdentityRecord::new("churn", "", 0, 0))
        .unwrap();

    let profilers: Vec<Address> = (0..1_000).map(|_| Address::random()).collect();
    for profiler in &profilers {
        store
            .create_profile(profiler, subject, ProfileRecord::new("x", "", 0, 0))
            .unwrap();
    }
    // Remove the even-indexed profilers, half by themselves, half by the operator.
    for (i, profiler) in profilers.iter().enumerate().filter(|(i, _)| i % 2 == 0) {
        let caller = if i % 4 == 0 { *profiler } else { operator };
        store.delete_profile(&caller, *profiler, subject).unwrap();
    }

    let mut listed = store.list_profiles(&subject);
    listed.sort();
    let mut expected: Vec<Address> = profilers.iter().skip(1).step_by(2).copied().collect();
    expected.sort();
    assert_eq!(listed, expected);
}
