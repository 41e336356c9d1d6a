use crate::stats;
use crate::Detector;
use core_types::{AnomalyPoint, Baseline, Group, Method};

/// Flags points outside the interquartile-range fences.
///
/// Q1 and Q3 are estimated with linear interpolation over the group's sorted
/// values; the fences are `Q1 - multiplier * IQR` and `Q3 + multiplier * IQR`.
/// A point strictly outside the fences is flagged with a score equal to its
/// distance past the violated fence, normalized by the IQR (negative below
/// the lower fence, positive above the upper).
pub struct IqrDetector {
    multiplier: f64,
}

/// Quartiles are not meaningful below this group size.
const MIN_POINTS: usize = 4;

impl IqrDetector {
    pub fn new(multiplier: f64) -> Self {
        Self { multiplier }
    }
}

impl Detector for IqrDetector {
    fn method(&self) -> Method {
        Method::Iqr
    }

    fn detect(&self, group: &Group) -> Vec<AnomalyPoint> {
        if group.len() < MIN_POINTS {
            return Vec::new();
        }

        let mut sorted = group.values();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = stats::quantile(&sorted, 0.25);
        let q3 = stats::quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        // Zero spread between the quartiles: nothing can sit outside fences
        // that coincide with the data, and the score would be undefined.
        if iqr == 0.0 {
            return Vec::new();
        }

        let lower = q1 - self.multiplier * iqr;
        let upper = q3 + self.multiplier * iqr;
        let baseline = Baseline::Quartiles { q1, q3, lower, upper };

        let mut anomalies = Vec::new();
        for point in &group.points {
            let score = if point.value < lower {
                (point.value - lower) / iqr
            } else if point.value > upper {
                (point.value - upper) / iqr
            } else {
                continue;
            };
            tracing::debug!(
                group = ?group.key,
                index = point.index,
                score,
                "iqr anomaly"
            );
            anomalies.push(AnomalyPoint {
                group: group.key.clone(),
                index: point.index,
                timestamp: point.timestamp,
                value: point.value,
                method: Method::Iqr,
                score,
                baseline: baseline.clone(),
            });
        }
        anomalies
    }
}
