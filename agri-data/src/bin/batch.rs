use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use agri_data::{BatchEstimator, BatchSummary, FarmInputLoader, write_report};
use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Estimate crop yields for every row of a farm-input CSV file.
///
/// The CSV file should have the following columns:
/// - crop_type: wheat, corn, rice, soybeans, tomatoes or cotton
/// - land_size_acres: cultivated area, greater than 0
/// - soil_type: loamy, clay, sandy or silty
/// - irrigation_type: drip, sprinkler, flood or rainfed
/// - fertilizer_usage: organic, synthetic, mixed or none
/// - annual_rainfall_inches: 0 or more
/// - previous_yield_kg: optional
///
/// Rows that fail validation are listed in the report with their error.
#[derive(Parser, Debug)]
#[command(name = "agri-batch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing farm records
    #[arg(short, long)]
    file: PathBuf,

    /// Where to write the CSV report (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for the confidence figures, for reproducible reports
    #[arg(short, long)]
    seed: Option<u64>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    info!("reading farm records from {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = FarmInputLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let rows = BatchEstimator::new().run(&records, &mut rng);

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create: {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    write_report(writer, &rows).context("Failed to write report")?;

    let summary = BatchSummary::from_rows(&rows);
    info!(
        "{} rows: {} estimated, {} rejected, {} kg predicted in total",
        summary.rows, summary.estimated, summary.rejected, summary.total_predicted_kg
    );

    Ok(())
}
