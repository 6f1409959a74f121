//! Everflow Charts CLI
//!
//! Fetches an Everflow report for a date range and writes profit bar
//! charts per offer, affiliate and advertiser, plus a text report.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use env_logger::Env;
use std::path::PathBuf;

use everflow_charts::aggregator::Dimension;
use everflow_charts::chart::ChartConfig;
use everflow_charts::commands::{build_source, execute_generate, validate_args, GenerateArgs};
use everflow_charts::utils::config::{
    ApiConfig, DEFAULT_BASE_URL, DEFAULT_CURRENCY, DEFAULT_MOCK_FILE, DEFAULT_OUTPUT_DIR,
    DEFAULT_TIMEZONE_ID, DEFAULT_TOP_N,
};

/// Everflow Charts - profit by offer, affiliate and advertiser
#[derive(Parser, Debug)]
#[command(name = "everflow-charts")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Start date (YYYY-MM-DD)
    #[arg(long = "from")]
    from: String,

    /// End date (YYYY-MM-DD)
    #[arg(long = "to")]
    to: String,

    /// Everflow timezone id (e.g. 67 = Europe/Paris)
    #[arg(long, env = "EFLOW_TIMEZONE_ID", default_value_t = DEFAULT_TIMEZONE_ID)]
    timezone_id: i64,

    /// Currency code (e.g. USD)
    #[arg(long, env = "EFLOW_CURRENCY_ID", default_value = DEFAULT_CURRENCY)]
    currency: String,

    /// Output directory for charts and the report
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    out: PathBuf,

    /// Use mock data instead of the API
    #[arg(long)]
    mock: bool,

    /// Mock data file used with --mock
    #[arg(long, default_value = DEFAULT_MOCK_FILE)]
    mock_file: PathBuf,

    /// Limit output to these charts
    #[arg(long, value_enum, num_args = 1..)]
    charts: Vec<ChartChoice>,

    /// Number of entities per chart
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,

    /// Report template with {{FROM}}, {{TO}}, {{TIMEZONE_ID}}, {{CURRENCY_ID}}
    #[arg(long)]
    template: Option<PathBuf>,

    /// Chart width in pixels
    #[arg(long, default_value = "1000")]
    width: usize,

    /// Print text summary to stdout
    #[arg(long)]
    summary: bool,

    /// Everflow API key
    #[arg(long, env = "EFLOW_API_KEY", hide_env_values = true, default_value = "")]
    api_key: String,

    /// Everflow API base URL
    #[arg(long, env = "EFLOW_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Chart selector values
#[derive(ValueEnum, Clone, Copy, Debug)]
enum ChartChoice {
    Offers,
    Affiliates,
    Advertisers,
}

impl From<ChartChoice> for Dimension {
    fn from(choice: ChartChoice) -> Self {
        match choice {
            ChartChoice::Offers => Dimension::Offer,
            ChartChoice::Affiliates => Dimension::Affiliate,
            ChartChoice::Advertisers => Dimension::Advertiser,
        }
    }
}

fn main() {
    // A missing .env is fine; real environment variables still apply
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let api_config = ApiConfig::new(cli.api_key, cli.base_url)
        .with_timezone(cli.timezone_id)
        .with_currency(cli.currency.clone());

    let args = GenerateArgs {
        from: cli.from,
        to: cli.to,
        timezone_id: cli.timezone_id,
        currency: cli.currency,
        output_dir: cli.out,
        mock: cli.mock,
        mock_file: cli.mock_file,
        charts: cli.charts.into_iter().map(Dimension::from).collect(),
        top_n: cli.top_n,
        template: cli.template,
        print_summary: cli.summary,
        chart_config: ChartConfig::new().with_width(cli.width),
    };

    // Validate args first
    validate_args(&args)?;

    let source = build_source(&args, api_config)?;
    let outcome = execute_generate(&args, source.as_ref())?;

    println!("✔ Files generated in: {}", args.output_dir.display());
    for path in &outcome.artifacts {
        println!("   - {}", path.display());
    }

    Ok(())
}
