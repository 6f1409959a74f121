//! Chart rendering for ranked profit tables.
//!
//! This module converts ranked tables into SVG horizontal bar charts
//! and console summaries.

pub mod generator;

// Re-export main types
pub use generator::{
    chart_path, generate_bar_chart, generate_text_summary, Bar, ChartConfig, ChartRequest,
    MISSING_LABEL,
};
