//! # Error Tracking Module
//!
//! Health monitoring for a stream of NMEA parse results.
//!
//! This module handles:
//! - Classifying parse outcomes and callback error categories
//! - Counting errors per category
//! - Deriving a healthy/unhealthy verdict from consecutive failures
//! - Rate-limiting diagnostic output, except for fatal conditions

pub mod clock;
pub mod error_tracker;
pub mod sink;
pub mod stats;
pub mod types;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error_tracker::{ErrorTracker, DEFAULT_LOG_INTERVAL_MS, DEFAULT_MAX_CONSECUTIVE_ERRORS};
pub use sink::{Diagnostic, DiagnosticSink, TracingSink};
pub use stats::{CategoryCounts, Stats};
pub use types::{ErrorCategory, HealthTransition, ParseOutcome, Severity};
