//! Group flat records by dimension and rank the groups by profit.
//!
//! Groups are keyed by the `(id, name)` pair, so the same id observed
//! under two names forms two groups. Records missing a dimension form
//! their own `(None, None)` group rather than being dropped.

use super::dimension::Dimension;
use crate::parser::schema::{EntityId, FlatRecord};
use log::debug;
use std::collections::HashMap;

/// Summed profit for one `(id, name)` pair
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionGroup {
    pub id: Option<EntityId>,
    pub name: Option<String>,
    pub profit: f64,
    /// Number of records folded into this group
    pub records: usize,
}

impl DimensionGroup {
    pub fn new(id: Option<EntityId>, name: Option<String>) -> Self {
        Self {
            id,
            name,
            profit: 0.0,
            records: 0,
        }
    }

    fn add(&mut self, profit: f64) {
        self.profit += profit;
        self.records += 1;
    }
}

/// Groups of one dimension, best first, truncated to `top_n`
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTable {
    pub dimension: Dimension,

    /// Limit applied when truncating
    pub top_n: usize,

    /// Distinct groups before truncation
    pub total_groups: usize,

    pub groups: Vec<DimensionGroup>,
}

impl RankedTable {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }
}

/// Group records by an arbitrary key
///
/// **Public** - generic routine shared by every dimension
///
/// Groups come back in first-appearance order.
pub fn group_by_key<'a, F>(records: &'a [FlatRecord], key_fn: F) -> Vec<DimensionGroup>
where
    F: Fn(&'a FlatRecord) -> (Option<&'a EntityId>, Option<&'a str>),
{
    let mut index: HashMap<(Option<&EntityId>, Option<&str>), usize> = HashMap::new();
    let mut groups: Vec<DimensionGroup> = Vec::new();

    for record in records {
        let key = key_fn(record);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(DimensionGroup::new(key.0.cloned(), key.1.map(str::to_string)));
            groups.len() - 1
        });
        groups[slot].add(record.profit);
    }

    groups
}

/// Sort groups by profit (descending) and keep the first `top_n`
///
/// The sort is stable: equal profits keep their incoming order.
pub fn rank_groups(mut groups: Vec<DimensionGroup>, top_n: usize) -> Vec<DimensionGroup> {
    groups.sort_by(|a, b| b.profit.total_cmp(&a.profit));
    groups.truncate(top_n);
    groups
}

/// Build the ranked table for one dimension
///
/// **Public** - main entry point for aggregation
///
/// # Arguments
/// * `records` - Normalized records
/// * `dimension` - Dimension to group by
/// * `top_n` - Number of groups to keep (e.g., 15)
pub fn rank_dimension(records: &[FlatRecord], dimension: Dimension, top_n: usize) -> RankedTable {
    let groups = group_by_key(records, |record| dimension.key(record));
    let total_groups = groups.len();

    debug!(
        "Dimension {}: {} distinct groups from {} records",
        dimension,
        total_groups,
        records.len()
    );

    RankedTable {
        dimension,
        top_n,
        total_groups,
        groups: rank_groups(groups, top_n),
    }
}

/// Ranked tables for every dimension, in chart order
pub fn rank_all(records: &[FlatRecord], top_n: usize) -> Vec<RankedTable> {
    Dimension::ALL
        .iter()
        .map(|dimension| rank_dimension(records, *dimension, top_n))
        .collect()
}
