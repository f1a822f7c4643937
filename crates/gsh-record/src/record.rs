use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field map of a record: field name -> loosely structured value.
///
/// `serde_json::Map` equality is key/value based (insertion order is
/// irrelevant); array values inside compare element-wise in order. That is
/// exactly the comparison contract the reconciliation engine builds on.
pub type Fields = Map<String, Value>;

/// Point-in-time snapshot of one external entity, as fetched by a gatherer.
///
/// `key` is the stable identity of the entity within its collection: unique
/// per gather cycle and stable across cycles. The engine rejects records
/// with an empty key and batches with duplicate keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Stable identity within one collection. Must be non-empty.
    pub key: String,

    /// The observed document. Arbitrary nesting of primitives, arrays and
    /// objects is allowed.
    pub fields: Fields,

    /// Collection-level bookkeeping. Never participates in change
    /// detection: re-fetching unchanged data with a fresh timestamp must
    /// not register as a change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RecordMeta>,
}

impl Record {
    pub fn new(key: impl Into<String>, fields: Fields) -> Self {
        Self {
            key: key.into(),
            fields,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: RecordMeta) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Stamp the last-observed timestamp, keeping any other metadata.
    ///
    /// The caller supplies the clock; record construction stays
    /// deterministic and wall-clock free.
    pub fn observed_at(mut self, ts: DateTime<Utc>) -> Self {
        self.metadata
            .get_or_insert_with(RecordMeta::default)
            .observed_at_utc = Some(ts);
        self
    }
}

/// Bookkeeping attached to a record by the gatherer that produced it.
///
/// Excluded from all change comparisons.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    /// When the gatherer last saw this entity at the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at_utc: Option<DateTime<Utc>>,

    /// Which gatherer/source produced the record (free-form label).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl RecordMeta {
    pub fn observed(ts: DateTime<Utc>) -> Self {
        Self {
            observed_at_utc: Some(ts),
            source: None,
        }
    }
}
