//! # Error Tracker
//!
//! Counts parse outcomes and callback errors, keeps a consecutive-error
//! health verdict and rate-limits diagnostic output.
//!
//! ## Health
//!
//! ```text
//! Healthy   --(consecutive errors > max)-->  Unhealthy
//! Healthy   --(BufferTooSmall)----------->  Unhealthy
//! Unhealthy --(Success)------------------>  Healthy
//! ```
//!
//! Unknown and disabled sentences reset the error run but do not restore
//! health on their own; only a successful parse does.
//!
//! ## Usage
//!
//! ```
//! use nmea_health::tracker::{ErrorTracker, ParseOutcome, TracingSink};
//!
//! let mut tracker = ErrorTracker::new(3, 1000, TracingSink);
//! for _ in 0..4 {
//!     tracker.record_outcome(ParseOutcome::ChecksumFailed);
//! }
//! assert!(!tracker.is_healthy());
//!
//! tracker.record_outcome(ParseOutcome::Success);
//! assert!(tracker.is_healthy());
//! ```

use crate::config::TrackerConfig;

use super::sink::{Diagnostic, DiagnosticSink, TracingSink};
use super::stats::{CategoryCounts, Stats};
use super::types::{ErrorCategory, HealthTransition, ParseOutcome, Severity, ERROR_CATEGORY_COUNT};

/// Consecutive failures tolerated before the session is declared unhealthy
pub const DEFAULT_MAX_CONSECUTIVE_ERRORS: u32 = 10;

/// Minimum spacing between rate-limited diagnostics, in milliseconds
pub const DEFAULT_LOG_INTERVAL_MS: u64 = 1000;

/// Error and health bookkeeping for one parsing session.
///
/// Not internally synchronized: one tracker per parsing stream, or an
/// external lock around it.
#[derive(Debug)]
pub struct ErrorTracker<S: DiagnosticSink = TracingSink> {
    /// One counter per [`ErrorCategory`], indexed by `ErrorCategory::index`
    category_counts: [u64; ERROR_CATEGORY_COUNT],

    total_sentences: u64,
    successful_parses: u64,
    unknown_sentences: u64,
    disabled_sentences: u64,
    failed_sentences: u64,

    consecutive_errors: u32,
    max_consecutive_errors: u32,
    healthy: bool,

    /// `None` until the first rate-limited diagnostic goes out
    last_log_time: Option<u64>,
    log_interval_ms: u64,

    sink: S,
}

impl Default for ErrorTracker<TracingSink> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONSECUTIVE_ERRORS, DEFAULT_LOG_INTERVAL_MS, TracingSink)
    }
}

impl<S: DiagnosticSink> ErrorTracker<S> {
    /// Creates a healthy tracker with all counters at zero.
    ///
    /// # Arguments
    ///
    /// * `max_consecutive_errors` - Error run length tolerated before going unhealthy
    /// * `log_interval_ms` - Minimum spacing between rate-limited diagnostics
    /// * `sink` - Destination for diagnostic lines
    pub fn new(max_consecutive_errors: u32, log_interval_ms: u64, sink: S) -> Self {
        Self {
            category_counts: [0; ERROR_CATEGORY_COUNT],
            total_sentences: 0,
            successful_parses: 0,
            unknown_sentences: 0,
            disabled_sentences: 0,
            failed_sentences: 0,
            consecutive_errors: 0,
            max_consecutive_errors,
            healthy: true,
            last_log_time: None,
            log_interval_ms,
            sink,
        }
    }

    /// Creates a tracker from the `[tracker]` configuration section
    pub fn from_config(config: &TrackerConfig, sink: S) -> Self {
        Self::new(config.max_consecutive_errors, config.log_interval_ms, sink)
    }

    /// Records the outcome of one parse attempt.
    ///
    /// Every call counts exactly one sentence. The error run is updated first
    /// and health is then re-derived from the updated run length.
    ///
    /// # Returns
    ///
    /// * `HealthTransition` - Whether this call changed the health verdict
    pub fn record_outcome(&mut self, outcome: ParseOutcome) -> HealthTransition {
        let was_healthy = self.healthy;
        self.total_sentences += 1;

        if outcome.resets_error_run() {
            self.consecutive_errors = 0;
        } else {
            self.consecutive_errors = self.consecutive_errors.saturating_add(1);
        }

        match outcome {
            ParseOutcome::Success => {
                self.successful_parses += 1;
                self.healthy = true;
            }
            ParseOutcome::UnknownSentenceType => self.unknown_sentences += 1,
            ParseOutcome::SentenceDisabled => self.disabled_sentences += 1,
            ParseOutcome::ChecksumFailed
            | ParseOutcome::InvalidSentence
            | ParseOutcome::OtherError(_) => self.failed_sentences += 1,
            ParseOutcome::BufferTooSmall => {
                self.failed_sentences += 1;
                self.healthy = false;
                self.sink.emit(Diagnostic::new(
                    Severity::Fatal,
                    None,
                    outcome.code(),
                    "output buffer too small for parser; fix the buffer size",
                ));
            }
        }

        if self.consecutive_errors > self.max_consecutive_errors {
            self.healthy = false;
        }

        let transition = HealthTransition::between(was_healthy, self.healthy);
        if transition == HealthTransition::Recovered {
            self.sink.emit(Diagnostic::new(
                Severity::Info,
                None,
                outcome.code(),
                "parser session recovered",
            ));
        }

        transition
    }

    /// Records one error reported through the parser's error callback.
    ///
    /// The category counter always increments. A warning is emitted at most
    /// once per `log_interval_ms`; fatal categories additionally emit a fatal
    /// diagnostic on every call.
    ///
    /// # Arguments
    ///
    /// * `category` - Error classification from the callback
    /// * `code` - Parser result code attached to the error
    /// * `message` - Parser-supplied description
    /// * `now_ms` - Current monotonic time in milliseconds
    ///
    /// # Returns
    ///
    /// * `bool` - True if any diagnostic line was emitted
    pub fn record_error(
        &mut self,
        category: ErrorCategory,
        code: i32,
        message: &str,
        now_ms: u64,
    ) -> bool {
        self.category_counts[category.index()] += 1;

        let mut emitted = false;

        if self.log_due(now_ms) {
            self.sink.emit(Diagnostic::new(
                Severity::Warning,
                Some(category),
                code,
                format!("{} error ({}): {}", category, code, message),
            ));
            self.last_log_time = Some(now_ms);
            emitted = true;
        }

        if category.is_fatal() {
            self.sink.emit(Diagnostic::new(
                Severity::Fatal,
                Some(category),
                code,
                format!("unrecoverable {} error ({}): {}", category, code, message),
            ));
            emitted = true;
        }

        emitted
    }

    /// Time values that stand still or run backwards never count as elapsed
    fn log_due(&self, now_ms: u64) -> bool {
        match self.last_log_time {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.log_interval_ms,
        }
    }

    /// Read-only aggregation of every counter and the health verdict
    pub fn snapshot(&self) -> Stats {
        let errors = CategoryCounts::from_counters(&self.category_counts);
        Stats {
            total_sentences: self.total_sentences,
            successful_parses: self.successful_parses,
            unknown_sentences: self.unknown_sentences,
            disabled_sentences: self.disabled_sentences,
            failed_sentences: self.failed_sentences,
            consecutive_errors: self.consecutive_errors,
            errors,
            total_errors: errors.total(),
            success_rate: Stats::success_rate(self.successful_parses, self.total_sentences),
            healthy: self.healthy,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.healthy
    }

    pub fn consecutive_errors(&self) -> u32 {
        self.consecutive_errors
    }

    pub fn max_consecutive_errors(&self) -> u32 {
        self.max_consecutive_errors
    }

    pub fn log_interval_ms(&self) -> u64 {
        self.log_interval_ms
    }

    pub fn total_sentences(&self) -> u64 {
        self.total_sentences
    }

    pub fn error_count(&self, category: ErrorCategory) -> u64 {
        self.category_counts[category.index()]
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
