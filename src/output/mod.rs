//! Output writers for charts and reports.
//!
//! This module handles writing artifacts to disk:
//! - SVG bar charts
//! - The templated text report

pub mod report;
pub mod svg;

// Re-export main functions
pub use report::{
    load_template, render_report, write_report, ReportParams, DEFAULT_REPORT_TEMPLATE,
};
pub use svg::write_svg;

use crate::utils::error::OutputError;
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create the parent directories of `path` if they are missing
fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

/// Validate `path`, create its parent directories and write `content`
///
/// Returns the number of bytes written.
fn write_file(path: &Path, content: &str) -> Result<usize, OutputError> {
    validate_path(path)?;
    ensure_parent_dir(path)?;

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(content.as_bytes())?;
    writer.flush()?;

    Ok(content.len())
}
