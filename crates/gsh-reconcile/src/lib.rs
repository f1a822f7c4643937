//! gsh-reconcile
//!
//! Reconciliation engine shared by all gatherer processes.
//!
//! Architectural decisions:
//! - Incoming batch is a full snapshot of the source; absence means removal
//! - Identity is the record key; duplicate keys in one batch are an error
//! - Metadata never participates in change detection
//! - Output replaces the mirror; the change sequence explains what moved
//! - All validation happens before any output exists (all-or-nothing)
//!
//! Deterministic, pure logic. No IO. No clock. Safe to run concurrently,
//! one invocation per collection.

mod compare;
mod engine;

pub use compare::{diff_fields, fields_equal, values_equal};
pub use engine::{reconcile, ChangeTally, CollectionState, ReconcileError, ReconcileOutcome};
