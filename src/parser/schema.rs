//! Row schema definitions for reporting data.
//!
//! `RawRow` mirrors the nested shape returned by the reporting table
//! endpoint. Its sections stay raw JSON until normalization, so a
//! wrongly typed section is reported against its row rather than
//! failing the whole response. `RowColumns` and `RowMetrics` are the
//! typed views of those sections; every field is optional and defaults
//! at the serde boundary.
//! `FlatRecord` is the normalized, immutable shape used by aggregation.

use serde::Deserialize;
use std::fmt;

/// One row of the reporting table, as received
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    /// Dimension columns (offer, affiliate, advertiser), see `RowColumns`
    #[serde(default)]
    pub columns: Option<serde_json::Value>,

    /// Numeric metrics for the row, see `RowMetrics`
    #[serde(default)]
    pub metrics: Option<serde_json::Value>,
}

/// Dimension section of a raw row
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RowColumns {
    #[serde(default)]
    pub offer: Option<RawEntity>,

    #[serde(default)]
    pub affiliate: Option<RawEntity>,

    #[serde(default)]
    pub advertiser: Option<RawEntity>,
}

/// An `{id, name}` pair for one dimension
///
/// Both fields stay as raw JSON; ids are opaque and names are coerced
/// to text during normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEntity {
    #[serde(default)]
    pub id: Option<serde_json::Value>,

    #[serde(default)]
    pub name: Option<serde_json::Value>,
}

/// Metric section of a raw row
///
/// Values are kept as raw JSON so that a non-numeric value can be
/// reported as invalid row data instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RowMetrics {
    #[serde(default)]
    pub revenue: Option<serde_json::Value>,

    #[serde(default)]
    pub payout: Option<serde_json::Value>,

    /// Conversions
    #[serde(default)]
    pub cv: Option<serde_json::Value>,

    #[serde(default)]
    pub total_click: Option<serde_json::Value>,
}

/// Opaque entity identifier
///
/// JSON strings are kept verbatim, numbers use their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build an id from a raw JSON value; `null` means no id
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(Self(s.clone())),
            other => Some(Self(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Normalized report row
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatRecord {
    pub offer_id: Option<EntityId>,
    pub offer_name: Option<String>,
    pub affiliate_id: Option<EntityId>,
    pub affiliate_name: Option<String>,
    pub advertiser_id: Option<EntityId>,
    pub advertiser_name: Option<String>,
    pub revenue: f64,
    pub payout: f64,
    /// Always `revenue - payout`
    pub profit: f64,
    pub cv: f64,
    pub total_click: f64,
}
