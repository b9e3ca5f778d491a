// Rust guideline compliant 2026-08-05

//! Configuration management for the campus service.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for campus service behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Whether student photo URLs are probed for reachability at input
    /// time.
    #[serde(default = "default_probe_photo_urls")]
    pub probe_photo_urls: bool,

    /// Timeout for the photo URL probe, in seconds.
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

fn default_probe_photo_urls() -> bool {
    true
}

fn default_probe_timeout_secs() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_photo_urls: default_probe_photo_urls(),
            probe_timeout_secs: default_probe_timeout_secs(),
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides
    /// earlier):
    /// 1. Default values
    /// 2. Configuration file at `<data_dir>/config.toml`
    /// 3. Environment variables with `CAMPUS_` prefix
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the `.campus` data directory
    ///
    /// # Returns
    ///
    /// A Config with file and environment overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration file exists but cannot be read
    /// - The configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut config = Self::default();

        let config_path = data_dir.join("config.toml");
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let file_config: Config = toml::from_str(&content).map_err(|e| {
                crate::Error::InvalidConfig(format!("Invalid config file: {}", e))
            })?;
            config = file_config;
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `CAMPUS_PROBE_PHOTO_URLS` - Probe photo URLs (true/false)
    /// - `CAMPUS_PROBE_TIMEOUT_SECS` - Probe timeout in seconds
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable value is invalid.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("CAMPUS_PROBE_PHOTO_URLS") {
            self.probe_photo_urls = val.parse().map_err(|_| {
                crate::Error::InvalidConfig(
                    "CAMPUS_PROBE_PHOTO_URLS must be true or false".to_string(),
                )
            })?;
        }

        if let Ok(val) = std::env::var("CAMPUS_PROBE_TIMEOUT_SECS") {
            self.probe_timeout_secs = val.parse().map_err(|_| {
                crate::Error::InvalidConfig(
                    "CAMPUS_PROBE_TIMEOUT_SECS must be a positive number".to_string(),
                )
            })?;
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if `probe_timeout_secs` is zero.
    fn validate(&self) -> Result<()> {
        if self.probe_timeout_secs == 0 {
            return Err(crate::Error::InvalidConfig(
                "probe_timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Saves the configuration to a TOML file.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the `.campus` data directory
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization
    /// fails.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let config_path = data_dir.join("config.toml");
        let content = toml::to_string_pretty(self).map_err(|e| {
            crate::Error::InvalidConfig(format!("Failed to serialize config: {}", e))
        })?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}
