//! Settings file for the `agri` command.
//!
//! Values are resolved in this order, later ones winning:
//! 1. Defaults in code
//! 2. The TOML file given with `--config` (a missing file is not an error)
//! 3. Command-line flags
//!
//! ```toml
//! log_level = "debug"
//! log_file = "agri.log"
//! seed = 42
//!
//! [output]
//! json = true
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Level or full filter directive, e.g. `"info"` or `"agri_core=debug"`.
    pub log_level: String,

    /// Append log records to this file as well as the terminal.
    pub log_file: Option<PathBuf>,

    /// Seed for reproducible confidence figures and diagnoses.
    pub seed: Option<u64>,

    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Print `predict` and `detect` results as JSON.
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            seed: None,
            output: OutputConfig::default(),
        }
    }
}

/// Flag values that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub log_level: Option<String>,
    pub seed: Option<u64>,
    pub json: bool,
}

impl AppConfig {
    /// Parses settings from TOML text. Absent keys keep their defaults.
    pub fn from_toml(
        text: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads settings from `path`, or defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                debug!(path = %path.display(), "loading config");
                Self::from_toml(&text, path)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Applies command-line flags on top of the loaded settings.
    pub fn with_overrides(
        mut self,
        overrides: Overrides,
    ) -> Self {
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if overrides.json {
            self.output.json = true;
        }
        self
    }
}
