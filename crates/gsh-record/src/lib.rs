//! gsh-record
//!
//! Data contracts shared by every gatherer process and the reconciliation
//! engine:
//! - `Record` — point-in-time snapshot of one external entity
//! - `ChangedRecord` — record-to-record change descriptor
//! - `FieldState` / `FieldDelta` — per-field diff with explicit absence
//! - `measure_json_size` — serialized-size meter for payload budgeting
//!
//! Pure value types. No IO. Everything round-trips through JSON.

mod changed;
mod measure;
mod record;

pub use changed::{ChangeKind, ChangedRecord, FieldDelta, FieldDiffs, FieldState};
pub use measure::{measure_json_size, measure_json_size_pretty};
pub use record::{Fields, Record, RecordMeta};
