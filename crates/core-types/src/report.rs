use crate::dataset::GroupKey;
use crate::method::Method;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The statistical baseline a point was measured against.
///
/// The two z-score methods report the mean and standard deviation they used;
/// the IQR method reports the quartiles and the bounds derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Baseline {
    MeanStd { mean: f64, std_dev: f64 },
    Quartiles { q1: f64, q3: f64, lower: f64, upper: f64 },
}

/// A single flagged point, produced by one method. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyPoint {
    /// Group key, or `null` when no grouping field was configured.
    pub group: GroupKey,
    /// Position of the record in the original input.
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub method: Method,
    /// Normalized distance of the value from its baseline. Signed: negative
    /// means the value fell below the baseline, positive above.
    pub score: f64,
    pub baseline: Baseline,
}

/// The outcome of one method across the whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSummary {
    /// Flagged points in ascending (group key, original index) order.
    pub anomalies: Vec<AnomalyPoint>,
    pub total_anomalies: usize,
    /// Anomaly count over the total number of records in the dataset.
    pub anomaly_rate: f64,
}

impl MethodSummary {
    pub fn new(anomalies: Vec<AnomalyPoint>, total_records: usize) -> Self {
        let total_anomalies = anomalies.len();
        Self {
            anomalies,
            total_anomalies,
            anomaly_rate: rate(total_anomalies, total_records),
        }
    }
}

/// A deduplicated anomaly: one entry per (group, index) pair, attributed to
/// every method that flagged it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedPoint {
    pub group: GroupKey,
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    /// Methods that flagged this point, in request order.
    pub methods: Vec<Method>,
    /// Score and baseline from the first method (in request order) that
    /// flagged the point.
    pub score: f64,
    pub baseline: Baseline,
}

impl CombinedPoint {
    /// Starts a combined entry from the first method that flagged the point.
    pub fn from_point(point: &AnomalyPoint) -> Self {
        Self {
            group: point.group.clone(),
            index: point.index,
            timestamp: point.timestamp,
            value: point.value,
            methods: vec![point.method],
            score: point.score,
            baseline: point.baseline.clone(),
        }
    }
}

/// The deduplicated union of anomalies across all requested methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedSummary {
    pub anomalies: Vec<CombinedPoint>,
    pub total_anomalies: usize,
    pub anomaly_rate: f64,
}

impl CombinedSummary {
    pub fn new(anomalies: Vec<CombinedPoint>, total_records: usize) -> Self {
        let total_anomalies = anomalies.len();
        Self {
            anomalies,
            total_anomalies,
            anomaly_rate: rate(total_anomalies, total_records),
        }
    }
}

/// The final output of one `detect` invocation.
///
/// This struct is the data transfer object for detection results: it echoes
/// the resolved field names, holds one `MethodSummary` per requested method,
/// and the deduplicated `combined` view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub total_records: usize,
    pub time_field: String,
    pub value_field: String,
    pub group_field: Option<String>,
    /// Requested methods, deduplicated, in request order.
    pub methods_applied: Vec<Method>,
    pub results: BTreeMap<Method, MethodSummary>,
    pub combined: CombinedSummary,
}

fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_computes_rate_over_dataset_size() {
        let summary = MethodSummary::new(Vec::new(), 10);
        assert_eq!(summary.total_anomalies, 0);
        assert_eq!(summary.anomaly_rate, 0.0);

        let point = AnomalyPoint {
            group: None,
            index: 3,
            timestamp: chrono::DateTime::from_timestamp(0, 0).unwrap(),
            value: 42.0,
            method: Method::Iqr,
            score: 2.5,
            baseline: Baseline::Quartiles { q1: 1.0, q3: 2.0, lower: -0.5, upper: 3.5 },
        };
        let summary = MethodSummary::new(vec![point], 4);
        assert_eq!(summary.total_anomalies, 1);
        assert_eq!(summary.anomaly_rate, 0.25);
    }
}
