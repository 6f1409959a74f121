//! Row sources: the Everflow reporting API and offline mock files.

pub mod client;
pub mod mock;
pub mod types;

use crate::parser::schema::RawRow;
use crate::utils::error::FetchError;

// Re-export main types
pub use client::EverflowClient;
pub use mock::{load_mock_rows, MockSource};
pub use types::{extract_rows, ReportQuery, TableRequest, TableResponse};

/// Anything that can produce raw report rows for a query
///
/// The live client and the mock file both implement this, so nothing
/// downstream can tell them apart.
pub trait RowSource {
    fn fetch_rows(&self, query: &ReportQuery) -> Result<Vec<RawRow>, FetchError>;

    /// Short description for logs
    fn describe(&self) -> String;
}
