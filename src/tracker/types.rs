//! # Outcome and Category Types
//!
//! Closed enumerations for everything the external parser reports.

use serde::Serialize;
use std::fmt;

/// Parser result code for a successful parse
pub const OUTCOME_CODE_SUCCESS: i32 = 0;

/// Parser result code for a checksum mismatch
pub const OUTCOME_CODE_CHECKSUM_FAILED: i32 = -1;

/// Parser result code for a malformed sentence
pub const OUTCOME_CODE_INVALID_SENTENCE: i32 = -2;

/// Parser result code for a sentence type with no registered handler
pub const OUTCOME_CODE_UNKNOWN_SENTENCE_TYPE: i32 = -3;

/// Parser result code for a sentence type switched off in the parser
pub const OUTCOME_CODE_SENTENCE_DISABLED: i32 = -4;

/// Parser result code for an undersized output buffer
pub const OUTCOME_CODE_BUFFER_TOO_SMALL: i32 = -5;

/// Number of error categories
pub const ERROR_CATEGORY_COUNT: usize = 8;

/// Fine-grained error classification delivered through the error callback.
///
/// Exactly one category counter is incremented per callback invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Parameter,
    Checksum,
    Syntax,
    Semantic,
    Buffer,
    Config,
    State,
    Unknown,
}

impl ErrorCategory {
    /// All categories, in counter order
    pub const ALL: [ErrorCategory; ERROR_CATEGORY_COUNT] = [
        ErrorCategory::Parameter,
        ErrorCategory::Checksum,
        ErrorCategory::Syntax,
        ErrorCategory::Semantic,
        ErrorCategory::Buffer,
        ErrorCategory::Config,
        ErrorCategory::State,
        ErrorCategory::Unknown,
    ];

    /// Maps a raw callback category code onto a category.
    ///
    /// Codes the parser may add later land in `Unknown` so they are still counted.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => ErrorCategory::Parameter,
            1 => ErrorCategory::Checksum,
            2 => ErrorCategory::Syntax,
            3 => ErrorCategory::Semantic,
            4 => ErrorCategory::Buffer,
            5 => ErrorCategory::Config,
            6 => ErrorCategory::State,
            _ => ErrorCategory::Unknown,
        }
    }

    /// Position of this category's counter
    pub(crate) fn index(self) -> usize {
        match self {
            ErrorCategory::Parameter => 0,
            ErrorCategory::Checksum => 1,
            ErrorCategory::Syntax => 2,
            ErrorCategory::Semantic => 3,
            ErrorCategory::Buffer => 4,
            ErrorCategory::Config => 5,
            ErrorCategory::State => 6,
            ErrorCategory::Unknown => 7,
        }
    }

    /// Programming or configuration defects that a retry will not fix
    pub fn is_fatal(self) -> bool {
        match self {
            ErrorCategory::Buffer | ErrorCategory::Config | ErrorCategory::Parameter => true,
            ErrorCategory::Checksum
            | ErrorCategory::Syntax
            | ErrorCategory::Semantic
            | ErrorCategory::State
            | ErrorCategory::Unknown => false,
        }
    }

    /// Short lowercase label used in log lines
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Parameter => "parameter",
            ErrorCategory::Checksum => "checksum",
            ErrorCategory::Syntax => "syntax",
            ErrorCategory::Semantic => "semantic",
            ErrorCategory::Buffer => "buffer",
            ErrorCategory::Config => "config",
            ErrorCategory::State => "state",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result classification of a single parse attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    Success,
    ChecksumFailed,
    InvalidSentence,
    UnknownSentenceType,
    SentenceDisabled,
    BufferTooSmall,
    OtherError(i32),
}

impl ParseOutcome {
    /// Maps a raw parser result code onto an outcome
    pub fn from_code(code: i32) -> Self {
        match code {
            OUTCOME_CODE_SUCCESS => ParseOutcome::Success,
            OUTCOME_CODE_CHECKSUM_FAILED => ParseOutcome::ChecksumFailed,
            OUTCOME_CODE_INVALID_SENTENCE => ParseOutcome::InvalidSentence,
            OUTCOME_CODE_UNKNOWN_SENTENCE_TYPE => ParseOutcome::UnknownSentenceType,
            OUTCOME_CODE_SENTENCE_DISABLED => ParseOutcome::SentenceDisabled,
            OUTCOME_CODE_BUFFER_TOO_SMALL => ParseOutcome::BufferTooSmall,
            other => ParseOutcome::OtherError(other),
        }
    }

    /// Raw parser result code for this outcome
    pub fn code(self) -> i32 {
        match self {
            ParseOutcome::Success => OUTCOME_CODE_SUCCESS,
            ParseOutcome::ChecksumFailed => OUTCOME_CODE_CHECKSUM_FAILED,
            ParseOutcome::InvalidSentence => OUTCOME_CODE_INVALID_SENTENCE,
            ParseOutcome::UnknownSentenceType => OUTCOME_CODE_UNKNOWN_SENTENCE_TYPE,
            ParseOutcome::SentenceDisabled => OUTCOME_CODE_SENTENCE_DISABLED,
            ParseOutcome::BufferTooSmall => OUTCOME_CODE_BUFFER_TOO_SMALL,
            ParseOutcome::OtherError(code) => code,
        }
    }

    /// Outcomes that reset the consecutive error run
    pub fn resets_error_run(self) -> bool {
        matches!(
            self,
            ParseOutcome::Success
                | ParseOutcome::UnknownSentenceType
                | ParseOutcome::SentenceDisabled
        )
    }
}

impl fmt::Display for ParseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseOutcome::Success => f.write_str("success"),
            ParseOutcome::ChecksumFailed => f.write_str("checksum failed"),
            ParseOutcome::InvalidSentence => f.write_str("invalid sentence"),
            ParseOutcome::UnknownSentenceType => f.write_str("unknown sentence type"),
            ParseOutcome::SentenceDisabled => f.write_str("sentence disabled"),
            ParseOutcome::BufferTooSmall => f.write_str("buffer too small"),
            ParseOutcome::OtherError(code) => write!(f, "error code {}", code),
        }
    }
}

/// Severity of a diagnostic line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Fatal,
}

/// Health change caused by a single recorded outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTransition {
    /// Health is the same as before the call
    Unchanged,
    /// Tracker went from healthy to unhealthy
    Degraded,
    /// Tracker went from unhealthy back to healthy
    Recovered,
}

impl HealthTransition {
    /// Derives the transition from the health before and after a call
    pub fn between(was_healthy: bool, is_healthy: bool) -> Self {
        match (was_healthy, is_healthy) {
            (true, false) => HealthTransition::Degraded,
            (false, true) => HealthTransition::Recovered,
            _ => HealthTransition::Unchanged,
        }
    }

    /// True if the call changed health state
    pub fn changed(self) -> bool {
        self != HealthTransition::Unchanged
    }
}
