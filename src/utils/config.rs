//! Configuration and constants for the CLI.

use std::time::Duration;

/// Timeout for the reporting API request
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(60);

pub const DEFAULT_BASE_URL: &str = "https://api.eflow.team";
pub const REPORTING_TABLE_PATH: &str = "/v1/networks/reporting/entity/table";
pub const API_KEY_HEADER: &str = "X-Eflow-API-Key";

/// Everflow timezone id 67 is Europe/Paris
pub const DEFAULT_TIMEZONE_ID: i64 = 67;
pub const DEFAULT_CURRENCY: &str = "USD";

/// Number of groups kept per chart
pub const DEFAULT_TOP_N: usize = 15;
pub const MAX_TOP_N: usize = 1000;

pub const DEFAULT_OUTPUT_DIR: &str = "out";
pub const DEFAULT_MOCK_FILE: &str = "mock_data/sample_table_rows.json";
pub const REPORT_FILE_NAME: &str = "REPORT.md";

// Keys that may hold the row array in a reporting response, in precedence order
pub const ROW_FIELD_NAMES: &[&str] = &["rows", "data", "result"];

/// Connection settings for the Everflow API
///
/// Built once in main.rs from CLI flags and environment, then handed
/// to the client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timezone_id: i64,
    pub currency: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timezone_id: DEFAULT_TIMEZONE_ID,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn with_timezone(mut self, timezone_id: i64) -> Self {
        self.timezone_id = timezone_id;
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Full URL of the aggregated reporting table endpoint
    pub fn table_url(&self) -> String {
        format!("{}{}", self.base_url, REPORTING_TABLE_PATH)
    }
}
