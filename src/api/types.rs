//! Request and response types for the Everflow reporting table endpoint.
//!
//! The endpoint returns its rows under one of several keys depending on
//! the API version. We resolve this with a fixed precedence:
//! `rows`, then `data`, then `result` (see `ROW_FIELD_NAMES`). The first
//! key holding an array wins, even when that array is empty.

use crate::parser::schema::RawRow;
use crate::utils::config::{ApiConfig, ROW_FIELD_NAMES};
use crate::utils::error::FetchError;
use log::{debug, warn};
use serde::Serialize;

/// Dimension columns requested by default
pub const DEFAULT_COLUMNS: &[&str] = &["offer", "affiliate", "advertiser"];

/// Parameters for one report fetch
#[derive(Debug, Clone, PartialEq)]
pub struct ReportQuery {
    /// Start date (YYYY-MM-DD)
    pub from: String,

    /// End date (YYYY-MM-DD)
    pub to: String,

    /// Dimension columns to group the upstream table by
    pub columns: Vec<String>,

    pub filters: Vec<serde_json::Value>,
    pub exclusions: Vec<serde_json::Value>,
    pub settings: Option<serde_json::Value>,

    /// Overrides `ApiConfig::timezone_id` when set
    pub timezone_id: Option<i64>,

    /// Overrides `ApiConfig::currency` when set
    pub currency: Option<String>,
}

impl ReportQuery {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            columns: DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            filters: Vec::new(),
            exclusions: Vec::new(),
            settings: None,
            timezone_id: None,
            currency: None,
        }
    }

    pub fn with_timezone(mut self, timezone_id: i64) -> Self {
        self.timezone_id = Some(timezone_id);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

/// JSON body of the reporting table request
#[derive(Debug, Clone, Serialize)]
pub struct TableRequest {
    pub from: String,
    pub to: String,
    pub timezone_id: i64,
    pub currency_id: String,
    pub columns: Vec<ColumnSpec>,
    pub query: QuerySpec,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnSpec {
    pub column: String,
}

/// Optional query section; empty parts are omitted from the body
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuerySpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<serde_json::Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusions: Option<Vec<serde_json::Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<serde_json::Value>,
}

impl TableRequest {
    /// Build the request body, filling timezone and currency from config
    pub fn from_query(query: &ReportQuery, config: &ApiConfig) -> Self {
        let non_empty = |items: &Vec<serde_json::Value>| {
            if items.is_empty() {
                None
            } else {
                Some(items.clone())
            }
        };

        let settings = query.settings.clone().filter(|s| match s {
            serde_json::Value::Null => false,
            serde_json::Value::Object(map) => !map.is_empty(),
            _ => true,
        });

        Self {
            from: query.from.clone(),
            to: query.to.clone(),
            timezone_id: query.timezone_id.unwrap_or(config.timezone_id),
            currency_id: query
                .currency
                .clone()
                .unwrap_or_else(|| config.currency.clone()),
            columns: query
                .columns
                .iter()
                .map(|c| ColumnSpec { column: c.clone() })
                .collect(),
            query: QuerySpec {
                filters: non_empty(&query.filters),
                exclusions: non_empty(&query.exclusions),
                settings,
            },
        }
    }
}

/// Rows extracted from a reporting response
#[derive(Debug, Clone, Default)]
pub struct TableResponse {
    pub rows: Vec<RawRow>,

    /// Set by the API when the table hit its row cap
    pub incomplete_results: bool,
}

/// Extract rows from a response body
///
/// **Public** - shared by the live client and the mock source
///
/// Accepts a bare array of rows, or an object holding the rows under
/// one of `ROW_FIELD_NAMES`.
///
/// # Errors
/// * `FetchError::InvalidResponse` - no row array found, or a row is not an object
pub fn extract_rows(body: serde_json::Value) -> Result<TableResponse, FetchError> {
    let (rows_value, incomplete_results) = match body {
        serde_json::Value::Array(_) => {
            debug!("Response is a bare row array");
            (body, false)
        }
        serde_json::Value::Object(mut obj) => {
            let incomplete = obj
                .get("incomplete_results")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);

            let present: Vec<&str> = ROW_FIELD_NAMES
                .iter()
                .copied()
                .filter(|field| obj.get(*field).is_some_and(|v| v.is_array()))
                .collect();

            let Some(field) = present.first().copied() else {
                return Err(FetchError::InvalidResponse(format!(
                    "no row array under any of {:?}",
                    ROW_FIELD_NAMES
                )));
            };

            if present.len() > 1 {
                warn!(
                    "Response holds rows under {:?}; using '{}'",
                    present, field
                );
            }

            debug!("Reading rows from '{}'", field);
            let rows = obj.remove(field).unwrap_or_default();
            (rows, incomplete)
        }
        other => {
            return Err(FetchError::InvalidResponse(format!(
                "expected a JSON object or array, found {}",
                other
            )))
        }
    };

    let serde_json::Value::Array(items) = rows_value else {
        return Err(FetchError::InvalidResponse("row list is not an array".to_string()));
    };

    // Sections stay raw here; their contents are checked per row by the normalizer
    let rows = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<RawRow>(item).map_err(|e| {
                FetchError::InvalidResponse(format!("row {} is not an object: {}", index, e))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TableResponse {
        rows,
        incomplete_results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let query = ReportQuery::new("2024-01-01", "2024-01-31");
        let request = TableRequest::from_query(&query, &ApiConfig::default());
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({
                "from": "2024-01-01",
                "to": "2024-01-31",
                "timezone_id": 67,
                "currency_id": "USD",
                "columns": [
                    {"column": "offer"},
                    {"column": "affiliate"},
                    {"column": "advertiser"}
                ],
                "query": {}
            })
        );
    }

    #[test]
    fn test_request_overrides_and_filters() {
        let mut query = ReportQuery::new("2024-01-01", "2024-01-02")
            .with_timezone(80)
            .with_currency("EUR");
        query.filters = vec![json!({"resource_type": "offer", "filter_id_value": "12"})];
        query.settings = Some(json!({}));

        let request = TableRequest::from_query(&query, &ApiConfig::default());

        assert_eq!(request.timezone_id, 80);
        assert_eq!(request.currency_id, "EUR");
        assert_eq!(request.query.filters.as_ref().map(|f| f.len()), Some(1));
        assert!(request.query.exclusions.is_none());
        assert!(request.query.settings.is_none());
    }

    #[test]
    fn test_extract_bare_array() {
        let response = extract_rows(json!([{"metrics": {"revenue": 1}}])).unwrap();
        assert_eq!(response.rows.len(), 1);
        assert!(!response.incomplete_results);
    }

    #[test]
    fn test_extract_precedence() {
        let body = json!({
            "result": [{}, {}, {}],
            "data": [{}, {}],
            "rows": [{}]
        });
        assert_eq!(extract_rows(body).unwrap().rows.len(), 1);

        let body = json!({"result": [{}, {}, {}], "data": [{}, {}]});
        assert_eq!(extract_rows(body).unwrap().rows.len(), 2);
    }

    #[test]
    fn test_extract_empty_rows_wins() {
        let body = json!({"rows": [], "data": [{}]});
        assert!(extract_rows(body).unwrap().rows.is_empty());
    }

    #[test]
    fn test_extract_skips_non_array_keys() {
        let body = json!({"rows": null, "result": [{}], "incomplete_results": true});
        let response = extract_rows(body).unwrap();
        assert_eq!(response.rows.len(), 1);
        assert!(response.incomplete_results);
    }

    #[test]
    fn test_extract_missing_rows() {
        assert!(matches!(
            extract_rows(json!({"total": 0})),
            Err(FetchError::InvalidResponse(_))
        ));
        assert!(extract_rows(json!("nope")).is_err());
    }

    #[test]
    fn test_extract_malformed_row() {
        match extract_rows(json!({"rows": [{}, 42]})) {
            Err(FetchError::InvalidResponse(msg)) => assert!(msg.starts_with("row 1 ")),
            other => panic!("unexpected result: {:?}", other.map(|r| r.rows.len())),
        }
    }

    #[test]
    fn test_extract_keeps_wrongly_typed_sections() {
        let response = extract_rows(json!([{"metrics": "oops", "columns": {"offer": "A"}}])).unwrap();
        assert_eq!(response.rows.len(), 1);
        assert_eq!(response.rows[0].metrics, Some(json!("oops")));
    }
}
