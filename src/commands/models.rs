use crate::aggregator::{Dimension, ProfitTotals, RankedTable};
use crate::chart::ChartConfig;
use crate::output::ReportParams;
use crate::utils::config::{
    DEFAULT_CURRENCY, DEFAULT_MOCK_FILE, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEZONE_ID, DEFAULT_TOP_N,
};
use std::path::PathBuf;

/// Arguments for the generate command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    /// Start date (YYYY-MM-DD)
    pub from: String,

    /// End date (YYYY-MM-DD)
    pub to: String,

    /// Everflow timezone id
    pub timezone_id: i64,

    /// Currency code
    pub currency: String,

    /// Directory for charts and the report
    pub output_dir: PathBuf,

    /// Read rows from `mock_file` instead of the API
    pub mock: bool,

    pub mock_file: PathBuf,

    /// Charts to keep (empty = all)
    pub charts: Vec<Dimension>,

    /// Number of groups per chart
    pub top_n: usize,

    /// Report template (None = built-in template)
    pub template: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,

    pub chart_config: ChartConfig,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            from: String::new(),
            to: String::new(),
            timezone_id: DEFAULT_TIMEZONE_ID,
            currency: DEFAULT_CURRENCY.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            mock: false,
            mock_file: PathBuf::from(DEFAULT_MOCK_FILE),
            charts: Vec::new(),
            top_n: DEFAULT_TOP_N,
            template: None,
            print_summary: false,
            chart_config: ChartConfig::default(),
        }
    }
}

impl GenerateArgs {
    /// Dimensions to chart, in chart order and without duplicates
    pub fn selected_dimensions(&self) -> Vec<Dimension> {
        if self.charts.is_empty() {
            return Dimension::ALL.to_vec();
        }

        Dimension::ALL
            .iter()
            .copied()
            .filter(|d| self.charts.contains(d))
            .collect()
    }

    pub fn report_params(&self) -> ReportParams {
        ReportParams {
            from: self.from.clone(),
            to: self.to.clone(),
            timezone_id: self.timezone_id,
            currency: self.currency.clone(),
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    /// Chart files followed by the report, in write order
    pub artifacts: Vec<PathBuf>,

    pub totals: ProfitTotals,

    /// Ranked tables of the selected dimensions
    pub tables: Vec<RankedTable>,
}
