use std::io;
use std::path::PathBuf;

use agri_cli::render::Panel;
use agri_cli::{App, AppConfig, Overrides, YieldForm, logging};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Farm assistant: yield prediction, plant disease checks, farming questions
/// and a field dashboard.
#[derive(Debug, Parser)]
#[command(name = "agri", version, about)]
struct Cli {
    /// Settings file. Ignored when it does not exist.
    #[arg(long, global = true, default_value = "agri.toml")]
    config: PathBuf,

    /// Log level or filter directive, e.g. `debug` or `agri_core=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Seed for reproducible confidence figures and diagnoses.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Predict the harvest for one field.
    Predict(PredictArgs),

    /// Check a PNG or JPEG plant photo for disease.
    Detect {
        image: PathBuf,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Ask the assistant a single question.
    Ask { message: String },

    /// Talk to the assistant. `/clear` starts over, `/quit` leaves.
    Chat,

    /// Show the analytics dashboard.
    Dashboard {
        /// Show only this panel.
        #[arg(long, value_enum)]
        panel: Option<Panel>,
    },
}

/// Form fields are taken as text so that missing or malformed values get
/// the same messages as the form.
#[derive(Debug, Args)]
struct PredictArgs {
    /// wheat, corn, rice, soybeans, tomatoes or cotton
    #[arg(long, default_value = "")]
    crop: String,

    /// Land size in acres
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    land: String,

    /// loamy, clay, sandy or silty
    #[arg(long, default_value = "")]
    soil: String,

    /// drip, sprinkler, flood or rainfed
    #[arg(long, default_value = "")]
    irrigation: String,

    /// organic, synthetic, mixed or none
    #[arg(long, default_value = "")]
    fertilizer: String,

    /// Annual rainfall in inches
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    rainfall: String,

    /// Last season's harvest in kg
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    previous_yield: String,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

impl PredictArgs {
    fn to_form(&self) -> YieldForm {
        YieldForm {
            crop_type: self.crop.clone(),
            land_size_acres: self.land.clone(),
            soil_type: self.soil.clone(),
            irrigation_type: self.irrigation.clone(),
            fertilizer_usage: self.fertilizer.clone(),
            annual_rainfall_inches: self.rainfall.clone(),
            previous_yield_kg: self.previous_yield.clone(),
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let json = match &cli.command {
        Command::Predict(args) => args.json,
        Command::Detect { json, .. } => *json,
        _ => false,
    };
    let config = AppConfig::load(&cli.config)?.with_overrides(Overrides {
        log_level: cli.log_level.clone(),
        seed: cli.seed,
        json,
    });

    logging::init_logging(&config.log_level);
    if let Some(path) = &config.log_file {
        logging::enable_file_logging(path).context("Failed to enable file logging")?;
    }
    debug!(?config, "configuration resolved");

    let mut app = App::new(config);
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Predict(args) => app.predict(&args.to_form(), &mut out),
        Command::Detect { image, .. } => app.detect(&image, &mut out),
        Command::Ask { message } => app.ask(&message, &mut out),
        Command::Chat => app.chat(io::stdin().lock(), &mut out),
        Command::Dashboard { panel } => app.dashboard(panel, &mut out),
    }
}

#[cfg(test)]
mod tests {
    use agri_core::{ValidationError, validate};
    use pretty_assertions::assert_eq;

    use super::*;

    fn predict_args(extra: &[&str]) -> PredictArgs {
        let mut argv = vec![
            "agri",
            "predict",
            "--crop",
            "corn",
            "--soil",
            "clay",
            "--irrigation",
            "drip",
            "--fertilizer",
            "organic",
            "--rainfall",
            "30",
        ];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Predict(args) => args,
            other => panic!("expected predict, got {other:?}"),
        }
    }

    // =========================================================================
    // predict flag tests
    // =========================================================================

    #[test]
    fn negative_land_reaches_form_validation() {
        let args = predict_args(&["--land", "-3"]);

        assert_eq!(args.land, "-3");
        assert_eq!(
            validate(&args.to_form().to_draft()),
            Err(ValidationError::InvalidLandSize)
        );
    }

    #[test]
    fn negative_values_parse_as_text() {
        let args = predict_args(&["--land", "4", "--previous-yield", "-5", "--rainfall", "-1"]);

        assert_eq!(args.previous_yield, "-5");
        assert_eq!(args.rainfall, "-1");
    }

    #[test]
    fn missing_flags_default_to_empty_text() {
        let args = predict_args(&[]);

        assert_eq!(args.land, "");
        assert_eq!(args.previous_yield, "");
        assert!(!args.json);
    }
}
