//! User configuration.
//!
//! Holds the default girls-per-team bounds for coed age groups, where output
//! files go, and an optional log directory. Every field is optional; missing
//! values fall back to the built-in defaults.
//!
//! Configuration is stored at `~/.config/teamsort/config.json`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::balance::BalanceThresholds;
use crate::error::ConfigError;

/// Application name used for config directory paths
const APP_NAME: &str = "teamsort";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Output file name when none is given
pub const DEFAULT_OUTPUT_FILE: &str = "output_teams.csv";

/// Output directory when none is configured
const DEFAULT_OUTPUT_DIR: &str = "downloads";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub min_girls: Option<usize>,
    #[serde(default)]
    pub max_girls: Option<usize>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Could not find config directory")]
    NoConfigDir,

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Config {
    /// Load from the default location, or defaults if no file exists.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        let io_err = |source| ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = serde_json::to_string_pretty(self).map_err(|source| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, contents).map_err(io_err)
    }

    pub fn config_path() -> Result<PathBuf, ConfigFileError> {
        let config_dir = dirs::config_dir().ok_or(ConfigFileError::NoConfigDir)?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Girls-per-team bounds with defaults filled in.
    pub fn thresholds(&self) -> Result<BalanceThresholds, ConfigError> {
        let defaults = BalanceThresholds::default();
        BalanceThresholds::new(
            self.min_girls.unwrap_or(defaults.min_girls),
            self.max_girls.unwrap_or(defaults.max_girls),
        )
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
            .join(DEFAULT_OUTPUT_FILE)
    }
}
