use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A raw input record: an ordered mapping of field name to JSON scalar.
///
/// `serde_json`'s `preserve_order` feature keeps fields in the order they
/// appeared in the input, which the value-column auto-detection relies on.
pub type Record = serde_json::Map<String, Value>;

/// The key identifying a group. `None` is the single implicit group used
/// when no grouping field is configured.
pub type GroupKey = Option<String>;

/// One normalized input record: the coerced timestamp and numeric value,
/// plus the record's original position in the input for provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub group: GroupKey,
    pub value: f64,
}

/// The full normalized input, in original input order. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One member of a `Group`, carrying its provenance back into the `Dataset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupPoint {
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// A chronologically sorted slice of the dataset sharing one group key.
///
/// Invariant: `points` is sorted by timestamp ascending, ties broken by
/// original index ascending.
#[derive(Debug, Clone)]
pub struct Group {
    pub key: GroupKey,
    pub points: Vec<GroupPoint>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The values of this group's points, in chronological order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}
