use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::error;

use fa_geocoder::config::Config;
use fa_geocoder::{logging, pipeline};

#[derive(Parser)]
#[command(name = "fa_geocoder")]
#[command(about = "Geocode the SEC registered investment adviser export into CSV files")]
#[command(version = "0.1.0")]
struct Cli {
    /// TOML config file (defaults to fa_geocoder.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Adviser export to read (.xlsx, .xls, .ods or .csv)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Directory receiving SEC_fa_data.csv and SEC_fa_noaddy_data.csv
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Only process the first N rows, to verify a setup before a full run
    #[arg(long)]
    limit: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _guard = logging::init_logging();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(input) = cli.input {
        config.input_path = input;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }
    if cli.limit.is_some() {
        config.limit = cli.limit;
    }

    println!("🔄 Geocoding {}...", config.input_path.display());
    let summary = pipeline::run(&config).map_err(|e| {
        error!("Run failed: {}", e);
        e
    })?;

    println!("\n📊 Results:");
    println!("   Rows processed: {}", summary.total_rows);
    println!("   Geocoded: {}", summary.geocoded);
    println!("   Not found: {}", summary.not_found);
    println!("   Failed (lat 0, long 0): {}", summary.failed);
    println!(
        "   Without address: {} kept, {} dropped (no website)",
        summary.no_address_kept, summary.no_address_dropped
    );
    println!("   Output files: {}, {}", summary.geocoded_file, summary.no_address_file);
    if summary.failed > 0 {
        println!("\n⚠️  Check rows at lat 0, long 0 before using the data");
    }
    Ok(())
}
