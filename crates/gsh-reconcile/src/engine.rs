use std::collections::{BTreeMap, BTreeSet};

use gsh_record::{ChangeKind, ChangedRecord, Record};

use crate::compare::{diff_fields, fields_equal};

/// The persisted mirror of one collection: key -> last-known record.
///
/// BTreeMap so key iteration is deterministic (ascending), which fixes the
/// emission order of removals.
pub type CollectionState = BTreeMap<String, Record>;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Contract violations in the incoming batch.
///
/// Both are detected before any output is produced; a failing batch yields
/// no changes and no new state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// Two records in the batch share a key. The engine never guesses which
    /// duplicate is authoritative; the upstream fetch must be fixed.
    DuplicateKey { key: String },
    /// A record has an empty key. `position` is its index in the batch.
    EmptyKey { position: usize },
}

impl std::fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey { key } => {
                write!(f, "incoming batch contains key '{key}' more than once")
            }
            Self::EmptyKey { position } => {
                write!(f, "incoming record at index {position} has an empty key")
            }
        }
    }
}

impl std::error::Error for ReconcileError {}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of one reconciliation pass.
///
/// `changes` covers every key seen on either side exactly once; `new_state`
/// is the incoming snapshot keyed by record key, ready to persist as the
/// next mirror.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileOutcome {
    /// Added/Modified/Unchanged in incoming order, then Removed in
    /// ascending key order.
    pub changes: Vec<ChangedRecord>,
    pub new_state: CollectionState,
}

impl ReconcileOutcome {
    /// `true` when nothing moved: no additions, modifications or removals.
    pub fn is_all_unchanged(&self) -> bool {
        self.changes.iter().all(|c| !c.is_change())
    }

    /// Per-kind counts, the one-line summary a gatherer logs per cycle.
    pub fn tally(&self) -> ChangeTally {
        let mut tally = ChangeTally::default();
        for change in &self.changes {
            match change.kind {
                ChangeKind::Added => tally.added += 1,
                ChangeKind::Modified => tally.modified += 1,
                ChangeKind::Removed => tally.removed += 1,
                ChangeKind::Unchanged => tally.unchanged += 1,
            }
        }
        tally
    }
}

/// Per-kind change counts for one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeTally {
    pub added: usize,
    pub modified: usize,
    pub removed: usize,
    pub unchanged: usize,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Diff a fresh full snapshot against the previously persisted mirror.
///
/// `incoming` is the complete current state of the source collection for
/// this gather cycle; `previous_state` is the mirror as last persisted
/// (empty on the first ever run). Neither input is mutated.
///
/// For every key present in either input exactly one [`ChangedRecord`] is
/// emitted:
/// - in `previous_state` only  -> `Removed` (full snapshot: absence means
///   the entity no longer exists at the source)
/// - in `incoming` only        -> `Added`
/// - in both, fields equal     -> `Unchanged` (metadata is ignored)
/// - in both, fields differ    -> `Modified`, with per-field diffs
///
/// Re-running against the returned state with the same snapshot yields only
/// `Unchanged` entries.
///
/// # Errors
/// [`ReconcileError::DuplicateKey`] if the batch repeats a key,
/// [`ReconcileError::EmptyKey`] if any record lacks one. Validation runs
/// first; on error nothing is returned.
pub fn reconcile(
    incoming: &[Record],
    previous_state: &CollectionState,
) -> Result<ReconcileOutcome, ReconcileError> {
    // Validation pass: all-or-nothing, before any output exists.
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for (position, record) in incoming.iter().enumerate() {
        if record.key.is_empty() {
            return Err(ReconcileError::EmptyKey { position });
        }
        if !seen.insert(record.key.as_str()) {
            return Err(ReconcileError::DuplicateKey {
                key: record.key.clone(),
            });
        }
    }

    let mut changes: Vec<ChangedRecord> = Vec::with_capacity(incoming.len());
    let mut new_state = CollectionState::new();

    // Fresh side, in batch order.
    for record in incoming {
        let change = match previous_state.get(&record.key) {
            None => ChangedRecord::added(record.clone()),
            Some(previous) => {
                if fields_equal(&previous.fields, &record.fields) {
                    ChangedRecord::unchanged(previous.clone(), record.clone())
                } else {
                    let field_diffs = diff_fields(&previous.fields, &record.fields);
                    ChangedRecord::modified(previous.clone(), record.clone(), field_diffs)
                }
            }
        };
        changes.push(change);
        new_state.insert(record.key.clone(), record.clone());
    }

    // Mirror-only side: ascending key order via the BTreeMap.
    for (key, previous) in previous_state {
        if !new_state.contains_key(key) {
            changes.push(ChangedRecord::removed(previous.clone()));
        }
    }

    Ok(ReconcileOutcome { changes, new_state })
}
