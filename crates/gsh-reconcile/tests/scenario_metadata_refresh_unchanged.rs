use chrono::{TimeZone, Utc};
use gsh_record::{ChangeKind, Record, RecordMeta};
use gsh_reconcile::{reconcile, CollectionState};
use serde_json::{json, Value};

fn record(key: &str, doc: Value) -> Record {
    match doc {
        Value::Object(map) => Record::new(key, map),
        _ => panic!("expected object"),
    }
}

#[test]
fn scenario_refreshed_timestamp_alone_is_not_a_change() {
    let yesterday = Utc.with_ymd_and_hms(2024, 4, 30, 8, 0, 0).unwrap();
    let today = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();

    let stored = record("a", json!({"x": 1})).observed_at(yesterday);
    let prev: CollectionState = [("a".to_string(), stored)].into_iter().collect();

    let refetched = record("a", json!({"x": 1}))
        .with_metadata(RecordMeta {
            observed_at_utc: Some(today),
            source: Some("nightly-gatherer".to_string()),
        });

    let outcome = reconcile(&[refetched.clone()], &prev).unwrap();

    assert_eq!(outcome.changes.len(), 1);
    assert_eq!(outcome.changes[0].kind, ChangeKind::Unchanged);
    assert!(outcome.changes[0].field_diffs.is_empty());

    // The new mirror still carries the refreshed metadata.
    assert_eq!(outcome.new_state["a"], refetched);
}

#[test]
fn scenario_metadata_difference_with_field_drift_is_still_modified() {
    let ts = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    let prev: CollectionState = [("a".to_string(), record("a", json!({"x": 1})))]
        .into_iter()
        .collect();
    let incoming = vec![record("a", json!({"x": 2})).observed_at(ts)];

    let outcome = reconcile(&incoming, &prev).unwrap();
    assert_eq!(outcome.changes[0].kind, ChangeKind::Modified);
    // Metadata never shows up as a field diff.
    assert_eq!(outcome.changes[0].field_diffs.len(), 1);
    assert!(outcome.changes[0].field_diffs.contains_key("x"));
}
