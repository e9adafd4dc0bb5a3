//! Soil Fertility Analysis CLI
//!
//! One-shot fertility analysis for a coordinate, report JSON on stdout.
//!
//! Usage:
//!   soil-analyze --lat 26.85 --lon 80.95 --pretty

use anyhow::Result;
use clap::Parser;
use soil_survey::{client::DEFAULT_TIMEOUT_SEC, SoilAnalyzer, SurveyConfig};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "soil-analyze",
    about = "Soil-fertility advisory for a GPS coordinate"
)]
struct Args {
    /// Latitude in decimal degrees
    #[arg(long)]
    lat: f64,

    /// Longitude in decimal degrees
    #[arg(long)]
    lon: f64,

    /// Survey endpoint override
    #[arg(long)]
    endpoint: Option<String>,

    /// Survey request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SEC)]
    timeout_sec: u64,

    /// Pretty-print the report JSON
    #[arg(long)]
    pretty: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = SurveyConfig::default();
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    config.timeout_sec = args.timeout_sec;

    let analyzer = SoilAnalyzer::new(config);
    let report = analyzer.analyze(args.lat, args.lon).await?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}
