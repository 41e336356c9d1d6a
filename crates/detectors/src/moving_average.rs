use crate::stats;
use crate::Detector;
use core_types::{AnomalyPoint, Baseline, Group, Method};

/// Flags points that deviate from the mean of a trailing window.
///
/// For each position `i` in the group, the window covers the `window` most
/// recent points up to and including `i`. A point is flagged when its
/// absolute z-score against the window's sample mean and standard deviation
/// exceeds `threshold`.
pub struct MovingAverageDetector {
    window: usize,
    threshold: f64,
}

impl MovingAverageDetector {
    pub fn new(window: usize, threshold: f64) -> Self {
        Self { window, threshold }
    }
}

impl Detector for MovingAverageDetector {
    fn method(&self) -> Method {
        Method::MovingAverage
    }

    fn detect(&self, group: &Group) -> Vec<AnomalyPoint> {
        let values = group.values();
        let mut anomalies = Vec::new();

        for (i, point) in group.points.iter().enumerate() {
            let start = i.saturating_sub(self.window - 1);
            let window = &values[start..=i];
            // A single-point window has no spread to measure against.
            if window.len() < 2 {
                continue;
            }

            let mean = stats::mean(window);
            let std_dev = stats::sample_std(window, mean);
            // A constant run is never anomalous relative to itself.
            if std_dev == 0.0 {
                continue;
            }

            let score = (point.value - mean) / std_dev;
            if score.abs() > self.threshold {
                tracing::debug!(
                    group = ?group.key,
                    index = point.index,
                    score,
                    "moving-average anomaly"
                );
                anomalies.push(AnomalyPoint {
                    group: group.key.clone(),
                    index: point.index,
                    timestamp: point.timestamp,
                    value: point.value,
                    method: Method::MovingAverage,
                    score,
                    baseline: Baseline::MeanStd { mean, std_dev },
                });
            }
        }
        anomalies
    }
}
