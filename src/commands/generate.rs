//! Generate command implementation.
//!
//! The generate command:
//! 1. Fetches report rows (API or mock file)
//! 2. Normalizes rows into flat records
//! 3. Ranks profit per dimension
//! 4. Renders bar charts
//! 5. Writes chart files and the report

use crate::aggregator::{calculate_totals, rank_dimension, Dimension};
use crate::api::{EverflowClient, MockSource, ReportQuery, RowSource};
use crate::chart::{chart_path, generate_bar_chart, generate_text_summary, ChartRequest};
use crate::commands::models::{GenerateArgs, GenerateOutcome};
use crate::output::{load_template, write_report, write_svg};
use crate::parser::normalize_rows;
use crate::utils::config::{ApiConfig, MAX_TOP_N};
use crate::utils::error::DataError;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Execute the generate command against a row source
///
/// **Public** - main entry point called from main.rs
///
/// Nothing is written unless every step before the writes succeeds:
/// an empty result set or a malformed row aborts the run with no files.
///
/// # Errors
/// * Fetch failures (`FetchError`)
/// * `DataError::EmptyResultSet` / `DataError::InvalidRowData`
/// * Chart or file write errors
pub fn execute_generate(args: &GenerateArgs, source: &dyn RowSource) -> Result<GenerateOutcome> {
    let start_time = Instant::now();

    info!("Generating profit charts for {} -> {}", args.from, args.to);
    info!("Row source: {}", source.describe());

    // Step 1: Fetch rows
    info!("Step 1/5: Fetching report rows...");
    let query = ReportQuery::new(&args.from, &args.to)
        .with_timezone(args.timezone_id)
        .with_currency(&args.currency);
    let rows = source
        .fetch_rows(&query)
        .context("Failed to fetch report rows")?;

    if rows.is_empty() {
        return Err(DataError::EmptyResultSet.into());
    }

    // Step 2: Normalize
    info!("Step 2/5: Normalizing {} rows...", rows.len());
    let records = normalize_rows(&rows).context("Failed to normalize report rows")?;

    let totals = calculate_totals(&records);
    info!("Totals: {}", totals.summary());

    // Step 3: Rank
    let dimensions = args.selected_dimensions();
    let names: Vec<&str> = dimensions.iter().map(|d| d.plural()).collect();
    info!("Step 3/5: Ranking top {} {}...", args.top_n, names.join(", "));
    let tables: Vec<_> = dimensions
        .iter()
        .map(|dimension| rank_dimension(&records, *dimension, args.top_n))
        .collect();

    for table in &tables {
        debug!(
            "{}: {} of {} groups kept",
            table.dimension,
            table.len(),
            table.total_groups
        );
    }

    // Step 4: Render every chart before touching the disk
    info!("Step 4/5: Rendering charts...");
    let mut rendered = Vec::with_capacity(tables.len());
    for table in &tables {
        let request = ChartRequest::from_table(table, &args.output_dir);
        let svg = generate_bar_chart(&request, Some(&args.chart_config))
            .with_context(|| format!("Failed to render {} chart", table.dimension))?;
        rendered.push((request, svg));
    }

    let template = load_template(args.template.as_deref()).context("Failed to load report template")?;

    // Step 5: Write outputs
    info!("Step 5/5: Writing output files...");
    let mut artifacts = Vec::with_capacity(rendered.len() + 1);

    for (request, svg) in &rendered {
        write_svg(svg, &request.path)
            .with_context(|| format!("Failed to write {}", request.path.display()))?;
        info!("✓ Chart written to: {}", request.path.display());
        artifacts.push(request.path.clone());
    }

    remove_unselected_charts(&args.output_dir, &dimensions)?;

    let report_path = write_report(&template, &args.report_params(), &args.output_dir)
        .context("Failed to write report")?;
    info!("✓ Report written to: {}", report_path.display());
    artifacts.push(report_path);

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("PROFIT SUMMARY {} -> {}", args.from, args.to);
        println!("{}", "=".repeat(80));
        println!("{}", totals.summary());
        println!("\n{}", generate_text_summary(&tables, args.top_n));
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Generation completed in {:.2}s", elapsed.as_secs_f64());

    Ok(GenerateOutcome {
        artifacts,
        totals,
        tables,
    })
}

/// Build the row source selected by the arguments
///
/// The API key is only required for the live source.
pub fn build_source(args: &GenerateArgs, api_config: ApiConfig) -> Result<Box<dyn RowSource>> {
    if args.mock {
        Ok(Box::new(MockSource::new(&args.mock_file)))
    } else {
        let client = EverflowClient::new(api_config).context("Failed to create API client")?;
        Ok(Box::new(client))
    }
}

/// Delete chart files of dimensions that were not selected
///
/// **Private** - keeps the output directory limited to the requested charts
fn remove_unselected_charts(output_dir: &Path, selected: &[Dimension]) -> Result<()> {
    for dimension in Dimension::ALL {
        if selected.contains(&dimension) {
            continue;
        }

        let path = chart_path(output_dir, dimension);
        match std::fs::remove_file(&path) {
            Ok(()) => debug!("Removed unselected chart: {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to remove {}", path.display()))
            }
        }
    }

    Ok(())
}

/// Validate generate arguments
///
/// **Public** - can be called before execute_generate for early validation
pub fn validate_args(args: &GenerateArgs) -> Result<()> {
    let from = parse_date("from", &args.from)?;
    let to = parse_date("to", &args.to)?;

    if from > to {
        anyhow::bail!("Start date {} is after end date {}", args.from, args.to);
    }

    if args.top_n == 0 {
        anyhow::bail!("top_n must be greater than 0");
    }

    if args.top_n > MAX_TOP_N {
        anyhow::bail!("top_n is too large (max {})", MAX_TOP_N);
    }

    if args.currency.trim().is_empty() {
        anyhow::bail!("Currency cannot be empty");
    }

    if args.mock && args.mock_file.as_os_str().is_empty() {
        anyhow::bail!("Mock mode needs a mock file path");
    }

    if args.output_dir.as_os_str().is_empty() {
        anyhow::bail!("Output directory cannot be empty");
    }

    Ok(())
}

/// Parse a YYYY-MM-DD date
///
/// **Private** - internal helper for validate_args
fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    if value.is_empty() {
        anyhow::bail!("--{} date cannot be empty", field);
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("--{} must be a YYYY-MM-DD date, got '{}'", field, value))
}
