use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use stormdata::{
    ReportConfig, StormReport, DEFAULT_CUTOFF_YEAR, DEFAULT_DATA_FILE, DEFAULT_DATA_URL,
    DEFAULT_OUTPUT_DIR, DEFAULT_QUANTILE,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Rank NOAA storm event types by health and economic impact.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Storm data export (.csv, .csv.gz or .csv.bz2)
    #[arg(short, long, default_value = DEFAULT_DATA_FILE)]
    data: PathBuf,

    /// Event-type lookup, one "<name><code>" per line. Defaults to the bundled NWS table
    #[arg(short, long)]
    event_types: Option<PathBuf>,

    /// Directory for the charts and report.md
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    out_dir: PathBuf,

    /// First year of events to include
    #[arg(short, long, default_value_t = DEFAULT_CUTOFF_YEAR)]
    cutoff_year: i32,

    /// Quantile an event type must exceed to be kept, in [0, 1]
    #[arg(short, long, default_value_t = DEFAULT_QUANTILE)]
    quantile: f64,

    /// Where to download the data file from when it is missing
    #[arg(long, default_value = DEFAULT_DATA_URL)]
    download_url: String,

    /// Never download; fail if the data file is missing
    #[arg(long)]
    offline: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let config = ReportConfig::builder()
        .data_path(args.data)
        .maybe_event_types_path(args.event_types)
        .output_dir(args.out_dir)
        .cutoff_year(args.cutoff_year)
        .quantile(args.quantile)
        .maybe_download_url((!args.offline).then_some(args.download_url))
        .build();
    info!("Starting storm report with {:?}", config);

    let artifacts = StormReport::new(config)
        .context("invalid report configuration")?
        .run()
        .await
        .context("storm report failed")?;

    info!(
        "Wrote {} charts and {}",
        artifacts.charts.len(),
        artifacts.narrative.display()
    );
    Ok(())
}
