use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Record;

/// What happened to one key between the previous mirror and the fresh
/// snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
    Unchanged,
}

/// A field value on one side of a comparison, with absence made explicit.
///
/// `Absent` means the field name does not exist on that side of the schema.
/// It is never conflated with `Present(Value::Null)` — an explicit null is a
/// value. The adjacent serde tag keeps the distinction across JSON
/// round-trips, where a bare `null` would collapse both cases.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldState {
    Absent,
    Present(Value),
}

impl FieldState {
    pub fn from_lookup(value: Option<&Value>) -> Self {
        match value {
            Some(v) => FieldState::Present(v.clone()),
            None => FieldState::Absent,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldState::Absent)
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            FieldState::Present(v) => Some(v),
            FieldState::Absent => None,
        }
    }
}

/// The `(old, new)` pair for one differing field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDelta {
    pub previous: FieldState,
    pub current: FieldState,
}

/// Per-field diffs of a `Modified` change, keyed by field name.
pub type FieldDiffs = BTreeMap<String, FieldDelta>;

/// Computed difference between two records sharing a key (or between
/// nothing and a record, for additions and removals).
///
/// Shape invariants:
/// - `previous` is `None` iff `kind == Added`
/// - `current` is `None` iff `kind == Removed`
/// - `field_diffs` is non-empty iff `kind == Modified`
///
/// The four constructors uphold these; fields stay public so consumers can
/// destructure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChangedRecord {
    pub key: String,
    pub kind: ChangeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<Record>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<Record>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub field_diffs: FieldDiffs,
}

impl ChangedRecord {
    /// Key exists in the snapshot but not in the mirror.
    pub fn added(current: Record) -> Self {
        Self {
            key: current.key.clone(),
            kind: ChangeKind::Added,
            previous: None,
            current: Some(current),
            field_diffs: FieldDiffs::new(),
        }
    }

    /// Key exists on both sides and at least one field differs.
    pub fn modified(previous: Record, current: Record, field_diffs: FieldDiffs) -> Self {
        Self {
            key: current.key.clone(),
            kind: ChangeKind::Modified,
            previous: Some(previous),
            current: Some(current),
            field_diffs,
        }
    }

    /// Key exists in the mirror but not in the snapshot.
    pub fn removed(previous: Record) -> Self {
        Self {
            key: previous.key.clone(),
            kind: ChangeKind::Removed,
            previous: Some(previous),
            current: None,
            field_diffs: FieldDiffs::new(),
        }
    }

    /// Key exists on both sides with equal fields (metadata aside).
    pub fn unchanged(previous: Record, current: Record) -> Self {
        Self {
            key: current.key.clone(),
            kind: ChangeKind::Unchanged,
            previous: Some(previous),
            current: Some(current),
            field_diffs: FieldDiffs::new(),
        }
    }

    pub fn is_change(&self) -> bool {
        self.kind != ChangeKind::Unchanged
    }
}
