//! Row normalizer for reporting data.
//!
//! Turns nested `RawRow`s into `FlatRecord`s, one-to-one and in order,
//! deriving profit from revenue and payout.
//!
//! `revenue` and `payout` must be numeric; a bad value aborts with
//! `DataError::InvalidRowData`. The `cv` and `total_click` counters are
//! informational only, so a bad value there is logged and counted as 0.

use super::schema::{EntityId, FlatRecord, RawEntity, RawRow, RowColumns, RowMetrics};
use crate::utils::error::DataError;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Normalize a sequence of raw rows
///
/// **Public** - main entry point for normalization
///
/// # Errors
/// * `DataError::InvalidRowData` - a section has the wrong shape, or
///   revenue/payout could not be coerced to a number
pub fn normalize_rows(rows: &[RawRow]) -> Result<Vec<FlatRecord>, DataError> {
    debug!("Normalizing {} rows", rows.len());

    rows.iter()
        .enumerate()
        .map(|(index, row)| normalize_row(index, row))
        .collect()
}

/// Normalize one raw row
///
/// `index` is only used for error reporting.
pub fn normalize_row(index: usize, row: &RawRow) -> Result<FlatRecord, DataError> {
    let columns: RowColumns = parse_section(index, "columns", row.columns.as_ref())?;
    let metrics: RowMetrics = parse_section(index, "metrics", row.metrics.as_ref())?;

    let (offer_id, offer_name) = split_entity(columns.offer.as_ref());
    let (affiliate_id, affiliate_name) = split_entity(columns.affiliate.as_ref());
    let (advertiser_id, advertiser_name) = split_entity(columns.advertiser.as_ref());

    let revenue = coerce_metric(index, "revenue", metrics.revenue.as_ref())?;
    let payout = coerce_metric(index, "payout", metrics.payout.as_ref())?;
    let cv = coerce_counter(index, "cv", metrics.cv.as_ref());
    let total_click = coerce_counter(index, "total_click", metrics.total_click.as_ref());

    Ok(FlatRecord {
        offer_id,
        offer_name,
        affiliate_id,
        affiliate_name,
        advertiser_id,
        advertiser_name,
        revenue,
        payout,
        profit: revenue - payout,
        cv,
        total_click,
    })
}

/// Read a raw row section into its typed view
///
/// **Private** - internal helper for normalize_row
///
/// Absent and `null` sections give the default (all fields empty).
fn parse_section<T>(
    row: usize,
    field: &'static str,
    value: Option<&serde_json::Value>,
) -> Result<T, DataError>
where
    T: DeserializeOwned + Default,
{
    match value {
        None | Some(serde_json::Value::Null) => Ok(T::default()),
        Some(value) => <T as Deserialize>::deserialize(value).map_err(|e| {
            debug!("Row {}: bad '{}' section: {}", row, field, e);
            DataError::InvalidRowData {
                row,
                field,
                value: value.to_string(),
            }
        }),
    }
}

/// Split an optional raw entity into (id, name)
///
/// **Private** - internal helper for normalize_row
fn split_entity(entity: Option<&RawEntity>) -> (Option<EntityId>, Option<String>) {
    let Some(entity) = entity else {
        return (None, None);
    };

    let id = entity.id.as_ref().and_then(EntityId::from_json);
    let name = entity.name.as_ref().and_then(|value| match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    });

    (id, name)
}

/// Coerce a metric to f64, treating absence and `null` as 0.0
///
/// **Private** - internal helper for normalize_row
fn coerce_metric(
    row: usize,
    field: &'static str,
    value: Option<&serde_json::Value>,
) -> Result<f64, DataError> {
    let invalid = |value: &serde_json::Value| DataError::InvalidRowData {
        row,
        field,
        value: value.to_string(),
    };

    let Some(value) = value else {
        return Ok(0.0);
    };

    let parsed = match value {
        serde_json::Value::Null => return Ok(0.0),
        serde_json::Value::Number(n) => n.as_f64().ok_or_else(|| invalid(value))?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().map_err(|_| invalid(value))?,
        _ => return Err(invalid(value)),
    };

    if !parsed.is_finite() {
        return Err(invalid(value));
    }

    Ok(parsed)
}

/// Coerce an informational counter, counting bad values as 0.0
///
/// **Private** - internal helper for normalize_row
fn coerce_counter(row: usize, field: &'static str, value: Option<&serde_json::Value>) -> f64 {
    coerce_metric(row, field, value).unwrap_or_else(|e| {
        warn!("{}; counting it as 0", e);
        0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> RawRow {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_full_row() {
        let raw = row(json!({
            "columns": {
                "offer": {"id": 1, "name": "A"},
                "affiliate": {"id": "aff-7", "name": "Partner"},
                "advertiser": {"id": 3, "name": "Brand"}
            },
            "metrics": {"revenue": 100, "payout": 40.5, "cv": 3, "total_click": 120}
        }));

        let record = normalize_row(0, &raw).unwrap();

        assert_eq!(record.offer_id, Some(EntityId::from(1u64)));
        assert_eq!(record.offer_name.as_deref(), Some("A"));
        assert_eq!(record.affiliate_id, Some(EntityId::from("aff-7")));
        assert_eq!(record.advertiser_name.as_deref(), Some("Brand"));
        assert_eq!(record.revenue, 100.0);
        assert_eq!(record.payout, 40.5);
        assert_eq!(record.profit, 59.5);
        assert_eq!(record.cv, 3.0);
        assert_eq!(record.total_click, 120.0);
    }

    #[test]
    fn test_missing_metrics_is_zero_profit() {
        let raw = row(json!({"columns": {"offer": {"id": 1, "name": "A"}}}));
        let record = normalize_row(0, &raw).unwrap();
        assert_eq!(record.profit, 0.0);
        assert_eq!(record.revenue, 0.0);
    }

    #[test]
    fn test_missing_columns_are_none() {
        let raw = row(json!({"metrics": {"revenue": 5}}));
        let record = normalize_row(0, &raw).unwrap();
        assert!(record.offer_id.is_none());
        assert!(record.offer_name.is_none());
        assert!(record.advertiser_id.is_none());
        assert_eq!(record.profit, 5.0);
    }

    #[test]
    fn test_null_sections_are_defaults() {
        let raw = row(json!({"columns": null, "metrics": {"revenue": null, "payout": 2}}));
        let record = normalize_row(0, &raw).unwrap();
        assert_eq!(record.profit, -2.0);
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let raw = row(json!({"metrics": {"revenue": " 12.5 ", "payout": "2.5"}}));
        let record = normalize_row(0, &raw).unwrap();
        assert_eq!(record.profit, 10.0);
    }

    #[test]
    fn test_non_numeric_revenue_is_invalid() {
        let rows = vec![
            row(json!({"metrics": {"revenue": 1}})),
            row(json!({"metrics": {"revenue": "lots"}})),
        ];

        let err = normalize_rows(&rows).unwrap_err();
        match err {
            DataError::InvalidRowData { row, field, .. } => {
                assert_eq!(row, 1);
                assert_eq!(field, "revenue");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_bool_and_non_finite_are_invalid() {
        let raw = row(json!({"metrics": {"payout": true}}));
        assert!(normalize_row(0, &raw).is_err());

        let raw = row(json!({"metrics": {"revenue": "inf"}}));
        assert!(normalize_row(0, &raw).is_err());
    }

    #[test]
    fn test_wrongly_typed_sections_are_invalid() {
        let raw = row(json!({"metrics": "oops"}));
        match normalize_row(4, &raw).unwrap_err() {
            DataError::InvalidRowData { row, field, value } => {
                assert_eq!(row, 4);
                assert_eq!(field, "metrics");
                assert_eq!(value, "\"oops\"");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let raw = row(json!({"columns": {"offer": "A"}}));
        assert!(matches!(
            normalize_row(0, &raw),
            Err(DataError::InvalidRowData { field: "columns", .. })
        ));
    }

    #[test]
    fn test_bad_counters_count_as_zero() {
        let raw = row(json!({"metrics": {"revenue": 10, "cv": "n/a", "total_click": [1]}}));
        let record = normalize_row(0, &raw).unwrap();

        assert_eq!(record.profit, 10.0);
        assert_eq!(record.cv, 0.0);
        assert_eq!(record.total_click, 0.0);
    }

    #[test]
    fn test_order_preserved() {
        let rows = vec![
            row(json!({"columns": {"offer": {"id": 2, "name": "B"}}})),
            row(json!({"columns": {"offer": {"id": 1, "name": "A"}}})),
        ];
        let records = normalize_rows(&rows).unwrap();
        assert_eq!(records[0].offer_name.as_deref(), Some("B"));
        assert_eq!(records[1].offer_name.as_deref(), Some("A"));
    }
}
