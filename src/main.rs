//! rbreport CLI - Print incorrect predictions grouped by reasoning boundary tier.

use anyhow::{Context, Result};
use clap::Parser;
use rbreport::models::{DEFAULT_DATA_SPLIT, DEFAULT_K, DEFAULT_K2, DEFAULT_MAX_EXAMPLES};
use rbreport::{
    CombinedGranularity, Config, Mode, ReportParams, ResultSet, extract_incorrect, render_report,
};
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "rbreport")]
#[command(author = "Infernet <dev@infernet.org>")]
#[command(version)]
#[command(about = "Print incorrect predictions grouped by reasoning boundary tier")]
struct Cli {
    /// Data split whose registered parameters to use
    #[arg(long, default_value = DEFAULT_DATA_SPLIT)]
    data_split: String,

    /// Result file (JSONL); when given, the split table is not consulted
    #[arg(long)]
    result_path: Option<PathBuf>,

    /// CFRB threshold
    #[arg(long = "k", default_value_t = DEFAULT_K)]
    k: f64,

    /// CIRB threshold
    #[arg(long = "k2", default_value_t = DEFAULT_K2)]
    k2: f64,

    /// Evaluation mode
    #[arg(long, value_enum, default_value_t = Mode::Nl)]
    mode: Mode,

    /// Maximum number of examples printed per category
    #[arg(long, default_value_t = DEFAULT_MAX_EXAMPLES)]
    max_examples: usize,

    /// Path to configuration file (split table and scorer weights)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {path:?}"))?,
        None => Config::default(),
    };

    let params = ReportParams {
        data_split: cli.data_split,
        result_path: cli.result_path,
        k: cli.k,
        k2: cli.k2,
        mode: cli.mode,
        max_examples: cli.max_examples,
    };
    let resolved = config
        .resolve(&params)
        .context("Failed to resolve report parameters")?;

    info!(
        split = %params.data_split,
        path = %resolved.result_path.display(),
        "Resolved parameters"
    );

    let results = ResultSet::from_jsonl(&resolved.result_path)
        .with_context(|| format!("Failed to load results from {:?}", resolved.result_path))?;
    let scorer = CombinedGranularity::new(config.granularity.clone());

    let report = extract_incorrect(&results, &scorer, &resolved)?;

    let stdout = std::io::stdout();
    render_report(&report, &mut stdout.lock())?;

    Ok(())
}
