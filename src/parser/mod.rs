//! Report row parsing and normalization.
//!
//! This module handles:
//! - Defining the raw row schema received from the reporting API
//! - Normalizing raw rows into flat records with derived profit

pub mod normalizer;
pub mod schema;

// Re-export main types
pub use normalizer::{normalize_row, normalize_rows};
pub use schema::{EntityId, FlatRecord, RawEntity, RawRow, RowColumns, RowMetrics};
