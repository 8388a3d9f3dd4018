//! What each `agri` subcommand does.
//!
//! Output goes to the writer passed in so the commands can be driven from
//! tests; `main` hands them stdout.

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use agri_core::analytics::Dashboard;
use agri_core::detection::{ImageUpload, detect};
use agri_core::{FarmInput, YieldEstimate, YieldEstimator, validate};
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::form::YieldForm;
use crate::logging;
use crate::render::{
    Panel, write_chat_message, write_dashboard, write_detection, write_estimate,
};
use crate::state::AppState;

/// JSON shape of `predict --json`.
#[derive(Debug, Serialize)]
struct Prediction<'a> {
    input: &'a FarmInput,
    estimate: &'a YieldEstimate,
}

pub struct App {
    config: AppConfig,
    state: AppState,
    estimator: YieldEstimator,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let state = AppState::new(config.seed);
        Self {
            config,
            state,
            estimator: YieldEstimator::new(),
        }
    }

    /// Validates the form and prints the estimate.
    ///
    /// # Errors
    ///
    /// The first validation failure, with its form message.
    pub fn predict<W: Write>(
        &mut self,
        form: &YieldForm,
        out: &mut W,
    ) -> Result<()> {
        for note in form.number_warnings() {
            warn!("{note}");
        }

        let input = validate(&form.to_draft())?;
        debug!("validated form:\n{form}");
        let estimate = self.estimator.estimate(&input, &mut self.state.rng);

        if self.config.output.json {
            let prediction = Prediction {
                input: &input,
                estimate: &estimate,
            };
            serde_json::to_writer_pretty(&mut *out, &prediction)
                .context("Failed to encode prediction")?;
            writeln!(out)?;
        } else {
            write_estimate(out, &estimate)?;
        }
        Ok(())
    }

    /// Checks the image at `path` and prints a diagnosis.
    pub fn detect<W: Write>(
        &mut self,
        path: &Path,
        out: &mut W,
    ) -> Result<()> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to read image: {}", path.display()))?;
        let upload = ImageUpload::from_path(path, metadata.len());

        let result = detect(&upload, &mut self.state.rng)?;

        if self.config.output.json {
            serde_json::to_writer_pretty(&mut *out, &result)
                .context("Failed to encode detection result")?;
            writeln!(out)?;
        } else {
            write_detection(out, &result)?;
        }
        Ok(())
    }

    /// Answers a single message.
    pub fn ask<W: Write>(
        &mut self,
        message: &str,
        out: &mut W,
    ) -> Result<()> {
        let reply = self.state.chat.send(message)?;
        write_chat_message(out, reply)?;
        Ok(())
    }

    /// Line-by-line conversation until `/quit` or end of input.
    ///
    /// `/clear` starts over and `/log <level>` changes the log filter.
    /// A rejected message is reported and the loop carries on.
    pub fn chat<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
    ) -> Result<()> {
        for message in self.state.chat.messages() {
            write_chat_message(out, message)?;
        }

        for line in input.lines() {
            let line = line.context("Failed to read chat input")?;
            let command = line.trim();

            if command == "/quit" {
                break;
            }
            if command == "/clear" {
                self.state.clear_chat();
                info!("chat cleared");
                for message in self.state.chat.messages() {
                    write_chat_message(out, message)?;
                }
                continue;
            }
            if let Some(level) = command.strip_prefix("/log ") {
                match logging::set_log_level(level.trim()) {
                    Ok(()) => writeln!(out, "log level set to {}", level.trim())?,
                    Err(e) => writeln!(out, "! {e}")?,
                }
                continue;
            }

            if let Err(e) = self.state.chat.send(&line) {
                writeln!(out, "! {e}")?;
                continue;
            }
            // The question and its reply are the last two entries.
            let messages = self.state.chat.messages();
            for message in &messages[messages.len().saturating_sub(2)..] {
                write_chat_message(out, message)?;
            }
        }
        Ok(())
    }

    pub fn dashboard<W: Write>(
        &self,
        panel: Option<Panel>,
        out: &mut W,
    ) -> Result<()> {
        write_dashboard(out, &Dashboard::standard(), panel)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use agri_core::ValidationError;
    use agri_core::assistant::{ChatError, GREETING};
    use agri_core::detection::UploadError;
    use pretty_assertions::assert_eq;

    use super::*;

    fn app(json: bool) -> App {
        let mut config = AppConfig {
            seed: Some(7),
            ..AppConfig::default()
        };
        config.output.json = json;
        App::new(config)
    }

    fn form() -> YieldForm {
        YieldForm {
            crop_type: "corn".to_string(),
            land_size_acres: "3".to_string(),
            soil_type: "sandy".to_string(),
            irrigation_type: "flood".to_string(),
            fertilizer_usage: "none".to_string(),
            annual_rainfall_inches: "65".to_string(),
            previous_yield_kg: String::new(),
        }
    }

    fn output(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    // =========================================================================
    // predict tests
    // =========================================================================

    #[test]
    fn predict_prints_text_report() {
        let mut out = Vec::new();

        app(false).predict(&form(), &mut out).unwrap();

        let text = output(out);
        assert!(text.starts_with("Predicted Yield\n  5,164 kg\n"));
        assert!(text.contains("Excess rainfall may cause waterlogging issues"));
    }

    #[test]
    fn predict_prints_json() {
        let mut out = Vec::new();

        app(true).predict(&form(), &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["input"]["crop_type"], "corn");
        assert_eq!(value["estimate"]["predicted_yield_kg"], "5164");
        assert_eq!(value["estimate"]["risk_factors"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn predict_reports_first_validation_error() {
        let bad = YieldForm {
            crop_type: String::new(),
            land_size_acres: "0".to_string(),
            ..form()
        };
        let mut out = Vec::new();

        let err = app(false).predict(&bad, &mut out).unwrap_err();

        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::MissingCropType)
        );
        assert!(out.is_empty());
    }

    #[test]
    fn predict_with_seed_is_reproducible() {
        let mut first = Vec::new();
        let mut second = Vec::new();

        app(false).predict(&form(), &mut first).unwrap();
        app(false).predict(&form(), &mut second).unwrap();

        assert_eq!(output(first), output(second));
    }

    // =========================================================================
    // detect tests
    // =========================================================================

    #[test]
    fn detect_missing_file_is_an_error() {
        let mut out = Vec::new();

        let result = app(false).detect(Path::new("/no/such/leaf.png"), &mut out);

        assert!(result.is_err());
    }

    #[test]
    fn detect_rejects_wrong_type() {
        let path = std::env::temp_dir().join("agri-cli-detect-test.txt");
        fs::write(&path, b"not an image").unwrap();
        let mut out = Vec::new();

        let err = app(false).detect(&path, &mut out).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<UploadError>(),
            Some(UploadError::InvalidFileType { .. })
        ));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn detect_accepts_small_png() {
        let path = std::env::temp_dir().join("agri-cli-detect-test.png");
        fs::write(&path, [0u8; 64]).unwrap();
        let mut out = Vec::new();

        app(true).detect(&path, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["treatment"].as_array().unwrap().len(), 4);
        let _ = fs::remove_file(&path);
    }

    // =========================================================================
    // ask / chat tests
    // =========================================================================

    #[test]
    fn ask_prints_reply() {
        let mut out = Vec::new();

        app(false).ask("Any tips on pest control?", &mut out).unwrap();

        assert!(output(out).contains("Assistant: For pest management"));
    }

    #[test]
    fn ask_rejects_blank_message() {
        let mut out = Vec::new();

        let err = app(false).ask("  ", &mut out).unwrap_err();

        assert_eq!(err.downcast_ref::<ChatError>(), Some(&ChatError::EmptyMessage));
    }

    #[test]
    fn chat_runs_until_quit() {
        let input = Cursor::new("tell me about soil\n\n/clear\n/quit\nweather\n");
        let mut out = Vec::new();
        let mut app = app(false);

        app.chat(input, &mut out).unwrap();

        let text = output(out);
        assert_eq!(text.matches(GREETING).count(), 2);
        assert!(text.contains("You: tell me about soil"));
        assert!(text.contains("! Please enter a question or message."));
        assert!(!text.contains("You: weather"));
        assert_eq!(app.state.chat.messages().len(), 1);
    }

    #[test]
    fn chat_prints_question_before_reply() {
        let input = Cursor::new("Any tips on pest control?\n");
        let mut out = Vec::new();

        app(false).chat(input, &mut out).unwrap();

        let text = output(out);
        let question = text.find("You: Any tips on pest control?").unwrap();
        let reply = text.find("Assistant: For pest management").unwrap();
        assert!(question < reply);
        assert_eq!(text.lines().count(), 3);
    }

    // =========================================================================
    // dashboard tests
    // =========================================================================

    #[test]
    fn dashboard_shows_risk_alert_kpi() {
        let mut out = Vec::new();

        app(false).dashboard(Some(Panel::Health), &mut out).unwrap();

        let text = output(out);
        assert!(text.contains("Risk Alerts"));
        assert!(text.contains("Crop Health Monitoring"));
    }
}
