//! SVG horizontal bar chart generation.
//!
//! Hand-built SVG, no plotting backend:
//! - One bar per group, length proportional to summed profit
//! - Bars arrive sorted ascending and are stacked bottom-up, so the
//!   most profitable group sits on the top edge
//! - Negative profits extend left of the zero axis

use crate::aggregator::{Dimension, RankedTable};
use crate::utils::error::ChartError;
use log::{debug, info};
use quick_xml::escape::escape;
use std::path::{Path, PathBuf};

/// Label drawn for groups without a name
pub const MISSING_LABEL: &str = "(unnamed)";

const LABEL_MAX_CHARS: usize = 32;

/// Chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub width: usize,
    pub bar_height: usize,
    pub bar_gap: usize,
    /// Width reserved on the left for bar labels
    pub label_width: usize,
    pub positive_color: String,
    pub negative_color: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            bar_height: 24,
            bar_gap: 6,
            label_width: 240,
            positive_color: "rgb(70, 130, 180)".to_string(), // Steel Blue
            negative_color: "rgb(220, 20, 60)".to_string(),  // Crimson
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

/// One bar: label and value
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// Everything the renderer needs for one chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub dimension: Dimension,
    pub title: String,
    /// Draw order: ascending by value, first bar at the bottom
    pub bars: Vec<Bar>,
    pub path: PathBuf,
}

impl ChartRequest {
    /// Build the render request for a ranked table
    ///
    /// The table is best-first; the bars are re-sorted ascending with a
    /// stable sort so the best group is drawn last, on top.
    pub fn from_table(table: &RankedTable, out_dir: &Path) -> Self {
        let mut bars: Vec<Bar> = table
            .groups
            .iter()
            .map(|group| Bar {
                label: group
                    .name
                    .clone()
                    .unwrap_or_else(|| MISSING_LABEL.to_string()),
                value: group.profit,
            })
            .collect();

        bars.sort_by(|a, b| a.value.total_cmp(&b.value));

        Self {
            dimension: table.dimension,
            title: format!("Sum of profit by {} (Top {})", table.dimension, table.top_n),
            bars,
            path: chart_path(out_dir, table.dimension),
        }
    }
}

/// Output path of a dimension's chart inside `out_dir`
pub fn chart_path(out_dir: &Path, dimension: Dimension) -> PathBuf {
    out_dir.join(format!("{}.svg", dimension.file_stem()))
}

/// Generate an SVG bar chart for a request
///
/// # Errors
/// * `ChartError::EmptyTable` - the request has no bars
pub fn generate_bar_chart(
    request: &ChartRequest,
    config: Option<&ChartConfig>,
) -> Result<String, ChartError> {
    if request.bars.is_empty() {
        return Err(ChartError::EmptyTable(request.dimension.to_string()));
    }

    let config = config.cloned().unwrap_or_default();
    info!(
        "Generating {} chart with {} bars",
        request.dimension,
        request.bars.len()
    );

    let top_margin = 50;
    let bottom_margin = 50;
    let right_margin = 90;
    let row_height = config.bar_height + config.bar_gap;
    let plot_height = request.bars.len() * row_height;
    let total_height = top_margin + plot_height + bottom_margin;
    let width = config.width.max(config.label_width + right_margin + 100);
    let plot_left = config.label_width as f64;
    let plot_width = (width - config.label_width - right_margin) as f64;

    // Scale always includes zero so bar lengths stay comparable
    let min_value = request.bars.iter().map(|b| b.value).fold(0.0_f64, f64::min);
    let max_value = request.bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
    let span = if max_value > min_value {
        max_value - min_value
    } else {
        1.0
    };
    let scale = |value: f64| plot_left + (value - min_value) / span * plot_width;
    let zero_x = scale(0.0);

    let mut svg_content = String::new();

    // Header
    svg_content.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        width, total_height, width, total_height
    ));

    svg_content.push_str(
        r#"<style>.bar:hover { stroke: black; stroke-width: 1; opacity: 0.9; } text { font-family: sans-serif; }</style>"#,
    );

    // Title
    svg_content.push_str(&format!(
        r#"<text x="{}" y="28" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        width / 2,
        escape(request.title.as_str())
    ));

    // Bars, first one at the bottom
    let count = request.bars.len();
    for (i, bar) in request.bars.iter().enumerate() {
        let y = top_margin + (count - 1 - i) * row_height;
        let x_end = scale(bar.value);
        let (x, w) = if bar.value >= 0.0 {
            (zero_x, x_end - zero_x)
        } else {
            (x_end, zero_x - x_end)
        };
        let color = if bar.value >= 0.0 {
            &config.positive_color
        } else {
            &config.negative_color
        };
        let label = truncate_label(&bar.label);
        let label = escape(label.as_str());

        svg_content.push_str(&format!(
            r#"<rect class="bar" x="{:.2}" y="{}" width="{:.2}" height="{}" fill="{}"><title>{}: {:.2}</title></rect>"#,
            x, y, w, config.bar_height, color, escape(bar.label.as_str()), bar.value
        ));

        svg_content.push_str(&format!(
            r#"<text x="{:.2}" y="{}" font-size="12" text-anchor="end" dy="4">{}</text>"#,
            plot_left - 8.0,
            y + config.bar_height / 2,
            label
        ));

        svg_content.push_str(&format!(
            r#"<text x="{:.2}" y="{}" font-size="11" dx="4" dy="4" fill="rgb(80, 80, 80)">{:.2}</text>"#,
            x + w,
            y + config.bar_height / 2,
            bar.value
        ));
    }

    // Zero axis and x label
    let axis_bottom = top_margin + plot_height;
    svg_content.push_str(&format!(
        r#"<line x1="{:.2}" y1="{}" x2="{:.2}" y2="{}" stroke="black" stroke-width="1"/>"#,
        zero_x,
        top_margin - 4,
        zero_x,
        axis_bottom
    ));
    svg_content.push_str(&format!(
        r#"<text x="{:.2}" y="{}" font-size="13" text-anchor="middle">Profit</text>"#,
        plot_left + plot_width / 2.0,
        axis_bottom + 32
    ));

    svg_content.push_str("</svg>");

    debug!("Chart generated ({} bytes)", svg_content.len());
    Ok(svg_content)
}

/// Shorten long labels, counting characters rather than bytes
fn truncate_label(label: &str) -> String {
    if label.chars().count() > LABEL_MAX_CHARS {
        let head: String = label.chars().take(LABEL_MAX_CHARS - 3).collect();
        format!("{}...", head)
    } else {
        label.to_string()
    }
}

/// Create a text table of the ranked groups for the console
pub fn generate_text_summary(tables: &[RankedTable], max_lines: usize) -> String {
    let mut lines = Vec::new();

    for table in tables {
        let total: f64 = table.groups.iter().map(|g| g.profit).sum();
        let peak = table
            .groups
            .iter()
            .map(|g| g.profit.abs())
            .fold(0.0_f64, f64::max)
            .max(f64::EPSILON);

        lines.push(format!(
            "  PROFIT BY {} (top {} of {})",
            table.dimension.as_str().to_uppercase(),
            table.len().min(max_lines),
            table.total_groups
        ));
        lines.push("  ┏━━━━━┳━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┳━━━━━━━━━━━━┳━━━━━━━━━━━━━━┳━━━━━━━━━━━━━━━━━━━━━━━━━┓".to_string());
        lines.push(format!(
            "  ┃ {:>3} ┃ {:<32} ┃ {:<10} ┃ {:>12} ┃ {:<23} ┃",
            "#", "Name", "ID", "Profit", "Share of shown"
        ));
        lines.push("  ┣━━━━━╋━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╋━━━━━━━━━━━━╋━━━━━━━━━━━━━━╋━━━━━━━━━━━━━━━━━━━━━━━━━┫".to_string());

        for (rank, group) in table.groups.iter().take(max_lines).enumerate() {
            let name = group.name.as_deref().unwrap_or(MISSING_LABEL);
            let id = group
                .id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string());
            let bar_width = ((group.profit.abs() / peak) * 16.0).round() as usize;
            let share = if total != 0.0 {
                (group.profit / total) * 100.0
            } else {
                0.0
            };

            lines.push(format!(
                "  ┃ {:>3} ┃ {:<32} ┃ {:<10} ┃ {:>12.2} ┃ {:<16} {:>5.1}% ┃",
                rank + 1,
                truncate_label(name),
                truncate_to(&id, 10),
                group.profit,
                "█".repeat(bar_width.min(16)),
                share
            ));
        }

        lines.push("  ┗━━━━━┻━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┻━━━━━━━━━━━━┻━━━━━━━━━━━━━━┻━━━━━━━━━━━━━━━━━━━━━━━━━┛".to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}

fn truncate_to(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
