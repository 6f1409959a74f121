//! SVG chart output writer.

use crate::utils::error::OutputError;
use log::{debug, info};
use std::path::Path;

/// Write a rendered chart to `output_path`
///
/// **Public** - main entry point for SVG output
///
/// # Errors
/// * `OutputError::InvalidPath` - empty path, a directory, or an
///   uncreatable parent
/// * `OutputError::WriteFailed` - I/O error during write
pub fn write_svg(svg_content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    if output_path.extension().is_some_and(|ext| ext != "svg") {
        debug!("Chart path has no .svg extension: {}", output_path.display());
    }

    let bytes = super::write_file(output_path, svg_content)?;
    info!(
        "Chart written to {} ({:.2} KB)",
        output_path.display(),
        bytes as f64 / 1024.0
    );

    Ok(())
}
