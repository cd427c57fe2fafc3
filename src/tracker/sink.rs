//! # Diagnostic Sinks
//!
//! The only output channel of the error tracker. Production code routes
//! diagnostics into `tracing`; tests swap in a recorder.

use tracing::{error, info, warn};

use super::types::{ErrorCategory, Severity};

/// A single diagnostic line produced by the tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Category from the error callback, `None` for outcome-level diagnostics
    pub category: Option<ErrorCategory>,
    pub code: i32,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        category: Option<ErrorCategory>,
        code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            code,
            message: message.into(),
        }
    }
}

/// Receiver for tracker diagnostics
#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `tracing` macros
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        let category = diagnostic.category.map_or("outcome", ErrorCategory::label);
        match diagnostic.severity {
            Severity::Info => info!(category, code = diagnostic.code, "{}", diagnostic.message),
            Severity::Warning => warn!(category, code = diagnostic.code, "{}", diagnostic.message),
            Severity::Fatal => error!(
                category,
                code = diagnostic.code,
                "FATAL: {}",
                diagnostic.message
            ),
        }
    }
}

#[cfg(test)]
pub mod mocks {
    use super::*;

    /// Sink that keeps every diagnostic for later inspection
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub lines: Vec<Diagnostic>,
    }

    impl RecordingSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn count(&self, severity: Severity) -> usize {
            self.lines.iter().filter(|d| d.severity == severity).count()
        }
    }

    impl DiagnosticSink for RecordingSink {
        fn emit(&mut self, diagnostic: Diagnostic) {
            self.lines.push(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::RecordingSink;
    use super::*;

    #[test]
    fn test_tracing_sink_accepts_every_severity() {
        let mut sink = TracingSink;
        sink.emit(Diagnostic::new(Severity::Info, None, 0, "info"));
        sink.emit(Diagnostic::new(
            Severity::Warning,
            Some(ErrorCategory::Checksum),
            -1,
            "warning",
        ));
        sink.emit(Diagnostic::new(
            Severity::Fatal,
            Some(ErrorCategory::Buffer),
            -5,
            "fatal",
        ));
    }

    #[test]
    fn test_recording_sink_counts_by_severity() {
        let mut sink = RecordingSink::new();
        sink.emit(Diagnostic::new(Severity::Warning, None, 0, "a"));
        sink.emit(Diagnostic::new(Severity::Fatal, None, 0, "b"));
        sink.emit(Diagnostic::new(Severity::Fatal, None, 0, "c"));

        assert_eq!(sink.count(Severity::Warning), 1);
        assert_eq!(sink.count(Severity::Fatal), 2);
        assert_eq!(sink.count(Severity::Info), 0);
        assert_eq!(sink.lines[1].message, "b");
    }
}
