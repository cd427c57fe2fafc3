//! # Tracker Statistics
//!
//! Read-only snapshot of an [`ErrorTracker`](super::ErrorTracker).

use serde::Serialize;
use std::fmt;

use super::types::{ErrorCategory, ERROR_CATEGORY_COUNT};

/// Per-category error counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub parameter: u64,
    pub checksum: u64,
    pub syntax: u64,
    pub semantic: u64,
    pub buffer: u64,
    pub config: u64,
    pub state: u64,
    pub unknown: u64,
}

impl CategoryCounts {
    pub(crate) fn from_counters(counters: &[u64; ERROR_CATEGORY_COUNT]) -> Self {
        Self {
            parameter: counters[ErrorCategory::Parameter.index()],
            checksum: counters[ErrorCategory::Checksum.index()],
            syntax: counters[ErrorCategory::Syntax.index()],
            semantic: counters[ErrorCategory::Semantic.index()],
            buffer: counters[ErrorCategory::Buffer.index()],
            config: counters[ErrorCategory::Config.index()],
            state: counters[ErrorCategory::State.index()],
            unknown: counters[ErrorCategory::Unknown.index()],
        }
    }

    pub fn get(&self, category: ErrorCategory) -> u64 {
        match category {
            ErrorCategory::Parameter => self.parameter,
            ErrorCategory::Checksum => self.checksum,
            ErrorCategory::Syntax => self.syntax,
            ErrorCategory::Semantic => self.semantic,
            ErrorCategory::Buffer => self.buffer,
            ErrorCategory::Config => self.config,
            ErrorCategory::State => self.state,
            ErrorCategory::Unknown => self.unknown,
        }
    }

    /// Sum over all eight categories
    pub fn total(&self) -> u64 {
        ErrorCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

/// Point-in-time statistics for a parsing session
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stats {
    pub total_sentences: u64,
    pub successful_parses: u64,
    pub unknown_sentences: u64,
    pub disabled_sentences: u64,
    /// Outcomes that were neither success, unknown nor disabled
    pub failed_sentences: u64,
    pub consecutive_errors: u32,
    pub errors: CategoryCounts,
    pub total_errors: u64,
    /// `successful_parses / total_sentences`, 0 when nothing was submitted
    pub success_rate: f64,
    pub healthy: bool,
}

impl Stats {
    pub fn error_count(&self, category: ErrorCategory) -> u64 {
        self.errors.get(category)
    }

    pub(crate) fn success_rate(successful: u64, total: u64) -> f64 {
        if total == 0 {
            0.0
        } else {
            successful as f64 / total as f64
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Parser statistics:")?;
        writeln!(f, "  Total sentences:    {}", self.total_sentences)?;
        writeln!(f, "  Successful parses:  {}", self.successful_parses)?;
        writeln!(f, "  Unknown sentences:  {}", self.unknown_sentences)?;
        writeln!(f, "  Disabled sentences: {}", self.disabled_sentences)?;
        writeln!(f, "  Failed sentences:   {}", self.failed_sentences)?;
        writeln!(f, "  Success rate:       {:.1}%", self.success_rate * 100.0)?;
        writeln!(f, "Error counts:")?;
        for category in ErrorCategory::ALL {
            writeln!(f, "  {:<10} {}", category.label(), self.errors.get(category))?;
        }
        writeln!(f, "  {:<10} {}", "total", self.total_errors)?;
        write!(
            f,
            "Health: {} ({} consecutive errors)",
            if self.healthy { "HEALTHY" } else { "UNHEALTHY" },
            self.consecutive_errors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_counters() -> [u64; ERROR_CATEGORY_COUNT] {
        [1, 5, 2, 0, 0, 0, 3, 4]
    }

    #[test]
    fn test_category_counts_follow_counter_order() {
        let counts = CategoryCounts::from_counters(&sample_counters());
        assert_eq!(counts.get(ErrorCategory::Parameter), 1);
        assert_eq!(counts.get(ErrorCategory::Checksum), 5);
        assert_eq!(counts.get(ErrorCategory::Syntax), 2);
        assert_eq!(counts.get(ErrorCategory::State), 3);
        assert_eq!(counts.get(ErrorCategory::Unknown), 4);
        assert_eq!(counts.total(), 15);
    }

    #[test]
    fn test_success_rate_zero_when_empty() {
        assert_eq!(Stats::success_rate(0, 0), 0.0);
    }

    #[test]
    fn test_success_rate_ratio() {
        assert!((Stats::success_rate(3, 4) - 0.75).abs() < f64::EPSILON);
        assert_eq!(Stats::success_rate(5, 5), 1.0);
    }

    #[test]
    fn test_display_contains_summary() {
        let errors = CategoryCounts::from_counters(&sample_counters());
        let stats = Stats {
            total_sentences: 8,
            successful_parses: 6,
            unknown_sentences: 1,
            disabled_sentences: 0,
            failed_sentences: 1,
            consecutive_errors: 0,
            errors,
            total_errors: errors.total(),
            success_rate: Stats::success_rate(6, 8),
            healthy: true,
        };

        let text = stats.to_string();
        assert!(text.contains("Total sentences:    8"));
        assert!(text.contains("Success rate:       75.0%"));
        assert!(text.contains("checksum   5"));
        assert!(text.contains("total      15"));
        assert!(text.ends_with("Health: HEALTHY (0 consecutive errors)"));
    }

    #[test]
    fn test_stats_serialize_to_json() {
        let errors = CategoryCounts::default();
        let stats = Stats {
            total_sentences: 0,
            successful_parses: 0,
            unknown_sentences: 0,
            disabled_sentences: 0,
            failed_sentences: 0,
            consecutive_errors: 0,
            errors,
            total_errors: 0,
            success_rate: 0.0,
            healthy: true,
        };

        let value = serde_json::to_value(stats).unwrap();
        assert_eq!(value["healthy"], true);
        assert_eq!(value["errors"]["checksum"], 0);
    }
}
