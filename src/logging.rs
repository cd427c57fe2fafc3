//! # Logging Setup
//!
//! Installs the `tracing` subscriber used by [`TracingSink`](crate::tracker::TracingSink).

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{NmeaHealthError, Result};

/// Builds the filter: `RUST_LOG` directives plus the configured level
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let level = config
        .level
        .parse::<Level>()
        .map_err(|e| NmeaHealthError::Logging(format!("invalid level '{}': {}", config.level, e)))?;

    Ok(EnvFilter::from_default_env().add_directive(level.into()))
}

/// Install a global fmt subscriber.
///
/// Returns `Ok(false)` if another subscriber was already installed, which
/// happens when the integrator set up logging first.
pub fn init(config: &LoggingConfig) -> Result<bool> {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config)?)
        .try_init()
        .is_ok();

    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_accepts_configured_levels() {
        for &level in crate::config::LOG_LEVELS {
            let config = LoggingConfig {
                level: level.to_string(),
            };
            assert!(env_filter(&config).is_ok(), "level {} should parse", level);
        }
    }

    #[test]
    fn test_env_filter_rejects_garbage() {
        let config = LoggingConfig {
            level: "verbose".to_string(),
        };
        assert!(matches!(env_filter(&config), Err(NmeaHealthError::Logging(_))));
    }

    #[test]
    fn test_init_twice_is_tolerated() {
        let config = LoggingConfig::default();
        let _ = init(&config).unwrap();
        assert!(!init(&config).unwrap());
    }
}
