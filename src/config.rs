//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Log levels accepted by `[logging].level`
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Error tracker configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TrackerConfig {
    #[serde(default = "default_max_consecutive_errors")]
    pub max_consecutive_errors: u32,

    #[serde(default = "default_log_interval_ms")]
    pub log_interval_ms: u64,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Statistics telemetry configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TelemetryConfig {
    #[serde(default = "default_telemetry_enabled")]
    pub enabled: bool,

    #[serde(default = "default_telemetry_format")]
    pub format: String,
}

// Default value functions
fn default_max_consecutive_errors() -> u32 { crate::tracker::DEFAULT_MAX_CONSECUTIVE_ERRORS }
fn default_log_interval_ms() -> u64 { crate::tracker::DEFAULT_LOG_INTERVAL_MS }

fn default_log_level() -> String { "info".to_string() }

fn default_telemetry_enabled() -> bool { true }
fn default_telemetry_format() -> String { "jsonl".to_string() }

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_consecutive_errors: default_max_consecutive_errors(),
            log_interval_ms: default_log_interval_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: default_telemetry_enabled(),
            format: default_telemetry_format(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            logging: LoggingConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use nmea_health::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        if self.tracker.max_consecutive_errors == 0 || self.tracker.max_consecutive_errors > 10000 {
            return Err(crate::error::NmeaHealthError::Config(
                toml::de::Error::custom("max_consecutive_errors must be between 1 and 10000")
            ));
        }

        if self.tracker.log_interval_ms == 0 || self.tracker.log_interval_ms > 60000 {
            return Err(crate::error::NmeaHealthError::Config(
                toml::de::Error::custom("log_interval_ms must be between 1 and 60000")
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(crate::error::NmeaHealthError::Config(
                toml::de::Error::custom(format!(
                    "log level must be one of: {}",
                    LOG_LEVELS.join(", ")
                ))
            ));
        }

        // Validate telemetry format
        if self.telemetry.enabled && self.telemetry.format != "jsonl" {
            return Err(crate::error::NmeaHealthError::Config(
                toml::de::Error::custom("telemetry format must be 'jsonl' (only supported format)")
            ));
        }

        Ok(())
    }
}
