//! Everflow Charts
//!
//! Profit charts and reports from Everflow performance-marketing data.
//!
//! The pipeline fetches report rows (live API or mock file), normalizes
//! them into flat records, ranks summed profit by offer, affiliate and
//! advertiser, and renders one SVG bar chart per dimension plus a
//! templated text report.
//!
//! ## Getting Started
//!
//! ```bash
//! everflow-charts --from 2024-01-01 --to 2024-01-31 --mock
//! ```

pub mod aggregator;
pub mod api;
pub mod chart;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
