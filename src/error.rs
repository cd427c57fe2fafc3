//! # Error Types
//!
//! Custom error types for NMEA Health using `thiserror`.
//!
//! The tracking and quality components never fail; these errors only come from
//! loading configuration and writing telemetry.

use thiserror::Error;

/// Main error type for NMEA Health
#[derive(Debug, Error)]
pub enum NmeaHealthError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Telemetry serialization errors
    #[error("Telemetry error: {0}")]
    Telemetry(#[from] serde_json::Error),

    /// Logging subscriber could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result type alias for NMEA Health
pub type Result<T> = std::result::Result<T, NmeaHealthError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::Error as _;

    #[test]
    fn test_config_error_display() {
        let err = NmeaHealthError::from(toml::de::Error::custom("bad value"));
        assert!(err.to_string().starts_with("Configuration error:"));
        assert!(err.to_string().contains("bad value"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: NmeaHealthError = io.into();
        assert!(matches!(err, NmeaHealthError::Io(_)));
    }
}
