//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while fetching report rows
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("EFLOW_API_KEY is missing; set it in .env or the environment")]
    MissingApiKey,

    #[error("Failed to read mock data: {0}")]
    MockRead(#[from] std::io::Error),

    #[error("Failed to parse mock data: {0}")]
    MockParse(#[from] serde_json::Error),
}

/// Errors raised by row normalization and the data checks around it
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Invalid row data at row {row}: field '{field}' has invalid value {value}")]
    InvalidRowData {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("No data to chart; check the date range, API permissions or mock file")]
    EmptyResultSet,
}

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("No groups to chart for dimension '{0}'")]
    EmptyTable(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to read report template: {0}")]
    TemplateRead(std::io::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
