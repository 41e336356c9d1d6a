use core_types::{
    CombinedPoint, CombinedSummary, Group, GroupKey, Method, MethodSummary, Report,
};
use detectors::{create_detector, DetectorParams};
use normalizer::Normalized;
use std::collections::BTreeMap;

/// Runs every requested method over every group and merges the results into
/// the final `Report`.
///
/// Per-method summaries list anomalies in ascending (group key, original
/// index) order; the combined summary is the deduplicated union keyed by
/// (group key, original index), with each entry attributed to every method
/// that flagged it. No thresholds are re-evaluated here.
pub fn combine(
    normalized: &Normalized,
    groups: &BTreeMap<GroupKey, Group>,
    params: &DetectorParams,
) -> Report {
    let total_records = normalized.dataset.len();
    let mut results = BTreeMap::new();
    let mut merged: BTreeMap<(GroupKey, usize), CombinedPoint> = BTreeMap::new();

    for &method in &normalized.methods {
        let detector = create_detector(method, params);
        let mut anomalies = Vec::new();
        // Groups are independent; iterating the BTreeMap gives ascending key
        // order for free.
        for group in groups.values() {
            anomalies.extend(detector.detect(group));
        }
        anomalies.sort_by(|a, b| (&a.group, a.index).cmp(&(&b.group, b.index)));

        for point in &anomalies {
            merged
                .entry((point.group.clone(), point.index))
                .and_modify(|entry| {
                    if !entry.methods.contains(&method) {
                        entry.methods.push(method);
                    }
                })
                .or_insert_with(|| CombinedPoint::from_point(point));
        }

        tracing::info!(
            method = %method,
            anomalies = anomalies.len(),
            "method evaluated"
        );
        results.insert(method, MethodSummary::new(anomalies, total_records));
    }

    // The map is keyed by (group key, index), so values come out already in
    // the report's canonical order.
    let combined_points: Vec<CombinedPoint> = merged.into_values().collect();
    let combined = CombinedSummary::new(combined_points, total_records);

    Report {
        total_records,
        time_field: normalized.time_field.clone(),
        value_field: normalized.value_field.clone(),
        group_field: normalized.group_field.clone(),
        methods_applied: normalized.methods.clone(),
        results,
        combined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouper;
    use chrono::DateTime;
    use core_types::{Dataset, Row};

    fn normalized(values: &[f64], methods: Vec<Method>) -> Normalized {
        let rows = values
            .iter()
            .enumerate()
            .map(|(i, &value)| Row {
                index: i,
                timestamp: DateTime::from_timestamp(i as i64 * 86_400, 0).unwrap(),
                group: None,
                value,
            })
            .collect();
        Normalized {
            dataset: Dataset::new(rows),
            time_field: "date".to_string(),
            value_field: "value".to_string(),
            group_field: None,
            methods,
        }
    }

    #[test]
    fn combined_deduplicates_and_attributes_methods() {
        // One extreme spike that both z-score methods flag.
        let values = [100.0, 101.0, 99.0, 100.0, 102.0, 98.0, 1000.0, 100.0];
        let input = normalized(
            &values,
            vec![Method::MovingAverage, Method::StandardDeviation],
        );
        let groups = grouper::split(&input.dataset);
        let report = combine(&input, &groups, &DetectorParams::default());

        let per_method_total: usize = report
            .results
            .values()
            .map(|summary| summary.total_anomalies)
            .sum();
        assert!(report.combined.total_anomalies <= per_method_total);

        let spike = report
            .combined
            .anomalies
            .iter()
            .find(|a| a.index == 6)
            .expect("spike should be flagged");
        assert!(spike.methods.contains(&Method::MovingAverage));
        // Attribution order follows request order.
        assert_eq!(spike.methods[0], Method::MovingAverage);
    }

    #[test]
    fn rates_are_computed_over_dataset_size() {
        let values = [100.0, 101.0, 99.0, 100.0, 102.0, 98.0, 1000.0, 100.0];
        let input = normalized(&values, vec![Method::StandardDeviation]);
        let groups = grouper::split(&input.dataset);
        let report = combine(&input, &groups, &DetectorParams::default());

        let summary = &report.results[&Method::StandardDeviation];
        assert_eq!(
            summary.anomaly_rate,
            summary.total_anomalies as f64 / values.len() as f64
        );
        assert_eq!(report.total_records, values.len());
    }

    #[test]
    fn method_anomalies_are_sorted_by_group_then_index() {
        let rows = vec![
            Row {
                index: 0,
                timestamp: DateTime::from_timestamp(0, 0).unwrap(),
                group: Some("b".to_string()),
                value: 1000.0,
            },
            Row {
                index: 1,
                timestamp: DateTime::from_timestamp(86_400, 0).unwrap(),
                group: Some("b".to_string()),
                value: 1.0,
            },
            Row {
                index: 2,
                timestamp: DateTime::from_timestamp(0, 0).unwrap(),
                group: Some("a".to_string()),
                value: 2000.0,
            },
            Row {
                index: 3,
                timestamp: DateTime::from_timestamp(86_400, 0).unwrap(),
                group: Some("a".to_string()),
                value: 2.0,
            },
        ];
        let input = Normalized {
            dataset: Dataset::new(rows),
            time_field: "t".to_string(),
            value_field: "v".to_string(),
            group_field: Some("g".to_string()),
            methods: vec![Method::StandardDeviation],
        };
        let groups = grouper::split(&input.dataset);
        // Threshold low enough that every point in each two-point group flags.
        let params = DetectorParams {
            threshold: 0.5,
            ..DetectorParams::default()
        };
        let report = combine(&input, &groups, &params);

        let order: Vec<(Option<String>, usize)> = report.results[&Method::StandardDeviation]
            .anomalies
            .iter()
            .map(|a| (a.group.clone(), a.index))
            .collect();
        assert_eq!(
            order,
            vec![
                (Some("a".to_string()), 2),
                (Some("a".to_string()), 3),
                (Some("b".to_string()), 0),
                (Some("b".to_string()), 1),
            ]
        );
    }
}
