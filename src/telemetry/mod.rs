//! # Telemetry Module
//!
//! Writes tracker statistics as JSONL (JSON Lines).
//!
//! Each record is one JSON object on its own line:
//!
//! ```text
//! {"timestamp":"2024-05-01T12:00:00Z","stats":{"total_sentences":120,...}}
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use tracing::debug;

use crate::config::TelemetryConfig;
use crate::error::Result;
use crate::tracker::Stats;

/// Timestamped statistics snapshot
#[derive(Debug, Clone, Serialize)]
pub struct StatsRecord {
    pub timestamp: DateTime<Utc>,
    pub stats: Stats,
}

impl StatsRecord {
    /// Stamps a snapshot with the current UTC time
    pub fn now(stats: Stats) -> Self {
        Self {
            timestamp: Utc::now(),
            stats,
        }
    }
}

/// Appends statistics records to any writer, one per line
#[derive(Debug)]
pub struct StatsWriter<W: Write> {
    writer: W,
    records_written: u64,
}

impl<W: Write> StatsWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records_written: 0,
        }
    }

    /// Builds a writer if `[telemetry]` is enabled, `None` otherwise
    pub fn from_config(config: &TelemetryConfig, writer: W) -> Option<Self> {
        if !config.enabled {
            debug!("telemetry disabled, statistics will not be written");
            return None;
        }
        Some(Self::new(writer))
    }

    /// Serializes one record and terminates it with a newline.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the underlying write fails
    pub fn write_record(&mut self, record: &StatsRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.records_written += 1;
        Ok(())
    }

    /// Stamps and writes a snapshot
    pub fn write_stats(&mut self, stats: Stats) -> Result<()> {
        self.write_record(&StatsRecord::now(stats))
    }

    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::sink::mocks::RecordingSink;
    use crate::tracker::{ErrorCategory, ErrorTracker, ParseOutcome};
    use chrono::TimeZone;

    fn sample_stats() -> Stats {
        let mut tracker = ErrorTracker::new(10, 1000, RecordingSink::new());
        tracker.record_outcome(ParseOutcome::Success);
        tracker.record_outcome(ParseOutcome::ChecksumFailed);
        tracker.record_error(ErrorCategory::Checksum, -1, "mismatch", 0);
        tracker.snapshot()
    }

    #[test]
    fn test_write_single_record() {
        let record = StatsRecord {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            stats: sample_stats(),
        };

        let mut writer = StatsWriter::new(Vec::new());
        writer.write_record(&record).unwrap();
        assert_eq!(writer.records_written(), 1);

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert!(output.ends_with('\n'));

        let value: serde_json::Value = serde_json::from_str(output.trim_end()).unwrap();
        assert_eq!(value["timestamp"], "2024-05-01T12:00:00Z");
        assert_eq!(value["stats"]["total_sentences"], 2);
        assert_eq!(value["stats"]["errors"]["checksum"], 1);
        assert_eq!(value["stats"]["healthy"], true);
    }

    #[test]
    fn test_from_config_enabled_writes() {
        let config = TelemetryConfig::default();
        let mut writer = StatsWriter::from_config(&config, Vec::new()).unwrap();
        writer.write_stats(sample_stats()).unwrap();
        assert_eq!(writer.into_inner().iter().filter(|&&b| b == b'\n').count(), 1);
    }

    #[test]
    fn test_from_config_disabled_writes_nothing() {
        let config = TelemetryConfig {
            enabled: false,
            ..TelemetryConfig::default()
        };
        let mut output = Vec::new();
        assert!(StatsWriter::from_config(&config, &mut output).is_none());
        assert!(output.is_empty());
    }

    #[test]
    fn test_records_are_line_delimited() {
        let mut writer = StatsWriter::new(Vec::new());
        writer.write_stats(sample_stats()).unwrap();
        writer.write_stats(sample_stats()).unwrap();
        writer.write_stats(sample_stats()).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value["stats"]["success_rate"].is_number());
        }
    }

    #[test]
    fn test_write_to_file() {
        use std::io::Read;

        let mut file = tempfile::tempfile().unwrap();
        {
            let mut writer = StatsWriter::new(&mut file);
            writer.write_stats(sample_stats()).unwrap();
        }

        use std::io::Seek;
        file.rewind().unwrap();
        let mut contents = String::new();
        file.read_to_string(&mut contents).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }
}
