use simdb::datastore::record::RecordStore;
use simdb::datastore::stores::{ScalarStore, StoreHints};

#[test]
fn test_get_on_never_put_oid_returns_default() {
    let store: ScalarStore<i32> = ScalarStore::new(16, StoreHints::TEMP | StoreHints::HOT, -1);
    assert_eq!(store.get(0), -1);
    assert_eq!(store.get(999), -1);
}

#[test]
fn test_delete_resets_to_default() {
    let mut store: ScalarStore<i32> = ScalarStore::new(4, StoreHints::TEMP, -1);
    store.put(7, 3);
    assert_eq!(store.get(7), 3);
    store.delete(7);
    assert_eq!(store.get(7), -1);
    // Deleting an unknown OID is a no-op.
    store.delete(1000);
    assert_eq!(store.get(1000), -1);
}

#[test]
fn test_values_not_shared_across_oids() {
    let mut store: ScalarStore<i32> = ScalarStore::new(4, StoreHints::HOT, 0);
    store.put(1, 10);
    store.put(2, 20);
    assert_eq!(store.get(1), 10);
    assert_eq!(store.get(2), 20);
    store.put(1, 11);
    assert_eq!(store.get(2), 20);
}

/// Hints pick the backend, never the observable behavior: the same operation
/// sequence must read back identically whatever hints were given.
#[test]
fn test_hint_choices_do_not_change_behavior() {
    let variants = [
        StoreHints::empty(),
        StoreHints::TEMP,
        StoreHints::TEMP | StoreHints::HOT,
        StoreHints::STATIC,
    ];
    let mut results: Vec<Vec<(u64, i64)>> = Vec::new();
    for hints in variants {
        let mut store: ScalarStore<i64> = ScalarStore::new(8, hints, -7);
        store.put(30, 1);
        store.put(10, 2);
        store.put(20, 3);
        store.delete(10);
        store.put(40, 4);
        assert_eq!(store.get(10), -7);
        assert_eq!(store.get(30), 1);
        assert_eq!(store.get(55), -7);
        results.push(store.iter().collect());
    }
    for window in results.windows(2) {
        assert_eq!(window[0], window[1]);
    }
    // Ascending OID order with the deleted entry reading as default.
    assert_eq!(results[0], vec![(10, -7), (20, 3), (30, 1), (40, 4)]);
}

#[test]
fn test_iter_is_restartable_and_reads_latest_values() {
    let mut store: ScalarStore<i32> = ScalarStore::new(4, StoreHints::HOT, 0);
    store.put(1, 1);
    store.put(2, 2);
    let first: Vec<_> = store.iter().collect();
    let second: Vec<_> = store.iter().collect();
    assert_eq!(first, second);

    store.put(2, 22);
    let third: Vec<_> = store.iter().collect();
    assert_eq!(third, vec![(1, 1), (2, 22)]);
}

#[test]
fn test_record_store_columns_are_independent() {
    let mut store = RecordStore::new(8, StoreHints::TEMP | StoreHints::HOT);
    let assignment = store.add_column::<i32>(-1);
    let best_dist = store.add_column::<f64>(f64::INFINITY);

    store.put(assignment, 5, 2);
    store.put(best_dist, 5, 0.25);
    assert_eq!(store.get(assignment, 5), 2);
    assert_eq!(store.get(best_dist, 5), 0.25);

    // Deleting one column's value leaves the sibling untouched.
    store.delete(best_dist, 5);
    assert_eq!(store.get(best_dist, 5), f64::INFINITY);
    assert_eq!(store.get(assignment, 5), 2);
}

#[test]
fn test_record_store_per_column_defaults() {
    let mut store = RecordStore::new(4, StoreHints::empty());
    let label = store.add_column::<String>("unlabeled".to_string());
    let count = store.add_column::<u32>(0);

    assert_eq!(store.get(label, 1), "unlabeled");
    assert_eq!(store.get(count, 1), 0);

    store.put(count, 1, 9);
    // Putting into one column materializes the record; the other column
    // still reads its own default for that OID.
    assert_eq!(store.get(label, 1), "unlabeled");
    assert_eq!(store.get(count, 1), 9);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_record_store_column_iteration() {
    let mut store = RecordStore::new(4, StoreHints::HOT);
    let count = store.add_column::<u32>(0);
    store.put(count, 20, 2);
    store.put(count, 10, 1);
    store.put(count, 30, 3);

    let swept: Vec<_> = store.iter(count).collect();
    assert_eq!(swept, vec![(10, 1), (20, 2), (30, 3)]);
}

#[test]
fn test_record_store_column_added_after_rows() {
    let mut store = RecordStore::new(4, StoreHints::empty());
    let count = store.add_column::<u32>(0);
    store.put(count, 1, 5);
    store.put(count, 2, 6);

    let late = store.add_column::<i64>(-1);
    assert_eq!(store.get(late, 1), -1);
    store.put(late, 1, 100);
    assert_eq!(store.get(late, 1), 100);
    assert_eq!(store.get(late, 2), -1);
    assert_eq!(store.get(count, 1), 5);
}
