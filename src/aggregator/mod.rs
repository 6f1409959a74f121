//! Aggregation of normalized records into ranked profit tables.
//!
//! This module transforms flat records into:
//! - Per-dimension groups keyed by `(id, name)`
//! - Top-N tables ranked by summed profit
//! - Run-wide totals

pub mod dimension;
pub mod grouping;
pub mod metrics;

// Re-export main types and functions
pub use dimension::Dimension;
pub use grouping::{group_by_key, rank_all, rank_dimension, rank_groups, DimensionGroup, RankedTable};
pub use metrics::{calculate_totals, ProfitTotals};
