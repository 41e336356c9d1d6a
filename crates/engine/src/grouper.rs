use core_types::{Dataset, Group, GroupKey, GroupPoint};
use std::collections::BTreeMap;

/// Partitions the dataset into independent chronological groups.
///
/// Rows sharing a group key land in one `Group`; when no grouping field is
/// configured every row carries the `None` key and a single implicit group
/// results. Each group's points are sorted by timestamp ascending, ties
/// broken by original index ascending, so downstream ordering is
/// deterministic.
pub fn split(dataset: &Dataset) -> BTreeMap<GroupKey, Group> {
    let mut buckets: BTreeMap<GroupKey, Vec<GroupPoint>> = BTreeMap::new();
    for row in &dataset.rows {
        buckets.entry(row.group.clone()).or_default().push(GroupPoint {
            index: row.index,
            timestamp: row.timestamp,
            value: row.value,
        });
    }

    let mut groups = BTreeMap::new();
    for (key, mut points) in buckets {
        points.sort_by_key(|p| (p.timestamp, p.index));
        tracing::debug!(group = ?key, points = points.len(), "group built");
        groups.insert(key.clone(), Group { key, points });
    }
    groups
}
