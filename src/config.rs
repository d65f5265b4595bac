//! Configuration for sertop.
//!
//! YAML configuration with precedence: CLI > file > defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::series::SeriesBuffer;
use crate::state::BaudRate;
use crate::thresholds::ThresholdConfig;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Serial port identifier, e.g. `/dev/ttyUSB0` or `COM8`.
    #[serde(default = "default_port")]
    pub port: String,

    /// Baud rate; one of the fixed supported set.
    #[serde(default)]
    pub baud: BaudRate,

    /// Poll cadence in milliseconds.
    #[serde(default = "default_refresh_ms")]
    pub refresh_ms: u64,

    /// Number of readings to retain per series.
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Alert bounds.
    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

fn default_port() -> String {
    "/dev/ttyUSB0".to_string()
}
fn default_refresh_ms() -> u64 {
    1000
}
fn default_capacity() -> usize {
    SeriesBuffer::DEFAULT_CAPACITY
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            baud: BaudRate::default(),
            refresh_ms: default_refresh_ms(),
            capacity: default_capacity(),
            thresholds: ThresholdConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location: `<config dir>/sertop/config.yaml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("sertop").join("config.yaml"))
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::NotFound(path.display().to_string()))?;
        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            ConfigError::Parse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Writes the configuration as YAML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|e| ConfigError::Parse {
            line: 0,
            message: e.to_string(),
        })?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Returns the poll cadence as a Duration.
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }
}
