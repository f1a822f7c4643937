//! Deep value equality and field-level diffing.
//!
//! One recursive comparator dispatching on value shape:
//! - primitives compare by value; numbers compare numerically, so the
//!   integer and float spellings of the same value (`1` vs `1.0`, as
//!   produced by different serializers) are equal
//! - arrays compare element-wise, order-sensitive
//! - objects compare by key-set and per-key value, insertion order
//!   irrelevant
//!
//! Record metadata never passes through this module.

use std::collections::BTreeSet;

use serde_json::{Number, Value};

use gsh_record::{FieldDelta, FieldDiffs, FieldState, Fields};

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    // Mixed representations fall back to f64. Integers beyond 2^53 that
    // also mix int/float spellings lose precision here; sources emitting
    // such values consistently use one spelling and hit the exact arms.
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Recursive structural equality over loosely structured values.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => false,
    }
}

/// Whole-document equality over two field maps.
pub fn fields_equal(a: &Fields, b: &Fields) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|(k, x)| b.get(k).is_some_and(|y| values_equal(x, y)))
}

/// Per-field diff over the union of field names.
///
/// Returns one [`FieldDelta`] per name whose values differ; a name missing
/// on one side appears with [`FieldState::Absent`] there. Empty result
/// means the documents are equal.
pub fn diff_fields(previous: &Fields, current: &Fields) -> FieldDiffs {
    let names: BTreeSet<&str> = previous
        .keys()
        .chain(current.keys())
        .map(String::as_str)
        .collect();

    let mut diffs = FieldDiffs::new();
    for name in names {
        let old = previous.get(name);
        let new = current.get(name);
        let differs = match (old, new) {
            (Some(x), Some(y)) => !values_equal(x, y),
            (None, None) => false,
            _ => true,
        };
        if differs {
            diffs.insert(
                name.to_string(),
                FieldDelta {
                    previous: FieldState::from_lookup(old),
                    current: FieldState::from_lookup(new),
                },
            );
        }
    }
    diffs
}
