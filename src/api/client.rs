//! HTTP client for the Everflow reporting API.

use super::types::{extract_rows, ReportQuery, TableRequest, TableResponse};
use super::RowSource;
use crate::parser::schema::RawRow;
use crate::utils::config::{ApiConfig, API_KEY_HEADER, DEFAULT_API_TIMEOUT};
use crate::utils::error::FetchError;
use log::{debug, info, warn};
use reqwest::blocking::Client;

/// Client for the aggregated reporting table
pub struct EverflowClient {
    client: Client,
    config: ApiConfig,
}

impl EverflowClient {
    /// Create a new client
    ///
    /// # Errors
    /// * `FetchError::MissingApiKey` - no API key configured
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        if config.api_key.trim().is_empty() {
            return Err(FetchError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(DEFAULT_API_TIMEOUT)
            .build()
            .map_err(FetchError::RequestFailed)?;

        Ok(Self { client, config })
    }

    /// Fetch the aggregated table for a query
    ///
    /// Any non-success status is returned as `FetchError::Status` with
    /// the response body; nothing is retried.
    pub fn fetch_table(&self, query: &ReportQuery) -> Result<TableResponse, FetchError> {
        let url = self.config.table_url();
        let request = TableRequest::from_query(query, &self.config);

        info!(
            "Fetching report table {} -> {} (timezone {}, currency {})",
            request.from, request.to, request.timezone_id, request.currency_id
        );
        debug!("POST {} body: {:?}", url, request);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&request)
            .send()
            .map_err(FetchError::RequestFailed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status.as_u16(), response.text()));
        }

        let body: serde_json::Value = response.json().map_err(FetchError::RequestFailed)?;

        extract_rows(body)
    }
}

/// Build the error for a non-success response
///
/// **Private** - internal helper for fetch_table
///
/// A body that cannot be read is described in place of the body.
fn status_error<E: std::fmt::Display>(status: u16, body: Result<String, E>) -> FetchError {
    let body = body.unwrap_or_else(|e| format!("<unreadable body: {}>", e));
    warn!("Reporting API answered HTTP {}", status);
    FetchError::Status { status, body }
}

impl RowSource for EverflowClient {
    fn fetch_rows(&self, query: &ReportQuery) -> Result<Vec<RawRow>, FetchError> {
        let response = self.fetch_table(query)?;

        if response.incomplete_results {
            warn!("Incomplete results (10k row cap); narrow the date range or column set");
        }

        info!("Fetched {} rows", response.rows.len());
        Ok(response.rows)
    }

    fn describe(&self) -> String {
        format!("Everflow API at {}", self.config.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key() {
        let result = EverflowClient::new(ApiConfig::default());
        assert!(matches!(result, Err(FetchError::MissingApiKey)));
    }

    #[test]
    fn test_blank_api_key() {
        let result = EverflowClient::new(ApiConfig::new("   ", "https://api.eflow.team"));
        assert!(matches!(result, Err(FetchError::MissingApiKey)));
    }

    #[test]
    fn test_status_error_keeps_body() {
        let err = status_error::<String>(403, Ok("{\"error\":\"forbidden\"}".to_string()));
        assert_eq!(err.to_string(), "HTTP 403: {\"error\":\"forbidden\"}");
    }

    #[test]
    fn test_status_error_reports_unreadable_body() {
        let err = status_error(502, Err("connection reset"));
        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "<unreadable body: connection reset>");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_describe() {
        let client = EverflowClient::new(ApiConfig::new("key", "https://api.eflow.team/")).unwrap();
        assert_eq!(client.describe(), "Everflow API at https://api.eflow.team");
    }
}
