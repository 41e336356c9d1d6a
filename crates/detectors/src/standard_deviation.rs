use crate::stats;
use crate::Detector;
use core_types::{AnomalyPoint, Baseline, Group, Method};

/// Flags points that deviate from the group's global mean.
///
/// The mean and sample standard deviation are computed once over the whole
/// group; a point is flagged when its absolute z-score exceeds `threshold`.
pub struct StandardDeviationDetector {
    threshold: f64,
}

impl StandardDeviationDetector {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Detector for StandardDeviationDetector {
    fn method(&self) -> Method {
        Method::StandardDeviation
    }

    fn detect(&self, group: &Group) -> Vec<AnomalyPoint> {
        // With fewer than two points there is no spread to measure against.
        if group.len() < 2 {
            return Vec::new();
        }

        let values = group.values();
        let mean = stats::mean(&values);
        let std_dev = stats::sample_std(&values, mean);
        if std_dev == 0.0 {
            return Vec::new();
        }

        let mut anomalies = Vec::new();
        for point in &group.points {
            let score = (point.value - mean) / std_dev;
            if score.abs() > self.threshold {
                tracing::debug!(
                    group = ?group.key,
                    index = point.index,
                    score,
                    "standard-deviation anomaly"
                );
                anomalies.push(AnomalyPoint {
                    group: group.key.clone(),
                    index: point.index,
                    timestamp: point.timestamp,
                    value: point.value,
                    method: Method::StandardDeviation,
                    score,
                    baseline: Baseline::MeanStd { mean, std_dev },
                });
            }
        }
        anomalies
    }
}
