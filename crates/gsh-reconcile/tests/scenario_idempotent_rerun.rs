use gsh_record::{ChangeKind, Record};
use gsh_reconcile::{reconcile, CollectionState};
use serde_json::{json, Value};

fn record(key: &str, doc: Value) -> Record {
    match doc {
        Value::Object(map) => Record::new(key, map),
        _ => panic!("expected object"),
    }
}

#[test]
fn scenario_rerun_against_returned_state_is_all_unchanged() {
    let prev: CollectionState = [
        ("a".to_string(), record("a", json!({"x": 1}))),
        ("stale".to_string(), record("stale", json!({"x": 9}))),
    ]
    .into_iter()
    .collect();
    let incoming = vec![
        record("a", json!({"x": 2, "nested": {"deep": [1, 2]}})),
        record("b", json!({"fresh": true})),
    ];

    let first = reconcile(&incoming, &prev).unwrap();
    assert!(!first.is_all_unchanged());

    let second = reconcile(&incoming, &first.new_state).unwrap();
    assert!(second.is_all_unchanged());
    assert!(second
        .changes
        .iter()
        .all(|c| c.kind == ChangeKind::Unchanged));
    assert_eq!(second.new_state, first.new_state);

    let tally = second.tally();
    assert_eq!(tally.unchanged, 2);
    assert_eq!(tally.added + tally.modified + tally.removed, 0);
}
