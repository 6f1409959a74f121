//! Templated text report.
//!
//! Substitution is literal token replacement. Tokens that are not
//! recognized stay in the output verbatim.

use crate::utils::config::REPORT_FILE_NAME;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Template used when no template file is given
pub const DEFAULT_REPORT_TEMPLATE: &str = "\
# Everflow profit report

- Period: {{FROM}} to {{TO}}
- Timezone ID: {{TIMEZONE_ID}}
- Currency: {{CURRENCY_ID}}

## Charts

- Profit by offer: `profit_by_offer.svg`
- Profit by affiliate: `profit_by_affiliate.svg`
- Profit by advertiser: `profit_by_advertiser.svg`

Profit is revenue minus payout, summed per entity. Each chart shows the
most profitable entities, best on top.
";

/// Run parameters substituted into the template
#[derive(Debug, Clone, PartialEq)]
pub struct ReportParams {
    pub from: String,
    pub to: String,
    pub timezone_id: i64,
    pub currency: String,
}

/// Substitute the run parameters into a template
pub fn render_report(template: &str, params: &ReportParams) -> String {
    template
        .replace("{{FROM}}", &params.from)
        .replace("{{TO}}", &params.to)
        .replace("{{TIMEZONE_ID}}", &params.timezone_id.to_string())
        .replace("{{CURRENCY_ID}}", &params.currency)
}

/// Read a template file, or fall back to the built-in template
pub fn load_template(path: Option<&Path>) -> Result<String, OutputError> {
    match path {
        Some(path) => {
            debug!("Reading report template: {}", path.display());
            std::fs::read_to_string(path).map_err(OutputError::TemplateRead)
        }
        None => Ok(DEFAULT_REPORT_TEMPLATE.to_string()),
    }
}

/// Render the report and write it to `<out_dir>/REPORT.md`
///
/// Returns the path written.
pub fn write_report(
    template: &str,
    params: &ReportParams,
    out_dir: impl AsRef<Path>,
) -> Result<PathBuf, OutputError> {
    let output_path = out_dir.as_ref().join(REPORT_FILE_NAME);

    let content = render_report(template, params);
    let bytes = super::write_file(&output_path, &content)?;
    info!("Report written to {} ({} bytes)", output_path.display(), bytes);

    Ok(output_path)
}
