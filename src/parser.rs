//! # Parser Interface
//!
//! Contracts for the external NMEA-0183 parser. Sentence grammar, checksums
//! and talker dispatch all live behind these traits; this crate only consumes
//! their results.

use crate::tracker::ErrorCategory;
use crate::tracker::ParseOutcome;

/// Structured error reported by the parser while a parse is in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEvent {
    pub category: ErrorCategory,
    /// Parser result code associated with the error
    pub code: i32,
    pub message: String,
}

impl ErrorEvent {
    pub fn new(category: ErrorCategory, code: i32, message: impl Into<String>) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    /// Builds an event from a raw category code; unknown codes map to `Unknown`
    pub fn from_raw(category_code: i32, code: i32, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::from_code(category_code), code, message)
    }
}

/// Receives parser errors synchronously, before `parse` returns.
///
/// Implementations must not start another parse on the same session.
pub trait ErrorListener {
    fn on_error(&mut self, event: ErrorEvent);
}

/// Listener that drops every event
impl ErrorListener for () {
    fn on_error(&mut self, _event: ErrorEvent) {}
}

/// External NMEA sentence parser
pub trait SentenceParser {
    /// Minimum size of the `output` buffer passed to [`parse`](Self::parse)
    fn required_buffer_size(&self) -> usize;

    /// Parses one candidate sentence.
    ///
    /// May call `errors.on_error` zero or more times. An undersized `output`
    /// yields [`ParseOutcome::BufferTooSmall`], never a fault.
    fn parse(
        &mut self,
        sentence: &[u8],
        output: &mut [u8],
        errors: &mut dyn ErrorListener,
    ) -> ParseOutcome;
}

/// Dilution of precision as reported by the receiver
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dop {
    /// False when no GSA/GGA data has supplied a DOP yet
    pub valid: bool,
    pub hdop: f32,
}

impl Dop {
    pub fn new(hdop: f32) -> Self {
        Self { valid: true, hdop }
    }

    pub fn invalid() -> Self {
        Self::default()
    }

    /// HDOP if the receiver has reported one
    pub fn hdop(&self) -> Option<f32> {
        self.valid.then_some(self.hdop)
    }
}

/// Read-only view of the parser's GNSS state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GnssSnapshot {
    /// GGA fix quality: 0 none, 1 GPS, 2 DGPS, above 2 RTK/PPS and friends
    pub fix_quality: u8,
    pub dop: Dop,
    pub satellites_used: u32,
}

/// Provider of GNSS state, usually the parser itself
#[cfg_attr(test, mockall::automock)]
pub trait GnssSource {
    /// Latest state, `None` before the first successful parse
    fn gnss_state(&self) -> Option<GnssSnapshot>;
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::collections::VecDeque;

    /// One scripted parse result
    #[derive(Debug, Clone)]
    pub struct Step {
        pub events: Vec<ErrorEvent>,
        pub outcome: ParseOutcome,
    }

    impl Step {
        pub fn ok() -> Self {
            Self {
                events: Vec::new(),
                outcome: ParseOutcome::Success,
            }
        }

        pub fn fail(outcome: ParseOutcome, events: Vec<ErrorEvent>) -> Self {
            Self { events, outcome }
        }
    }

    /// Parser that replays a script and records what it was given
    #[derive(Debug, Default)]
    pub struct ScriptedParser {
        pub script: VecDeque<Step>,
        pub buffer_size: usize,
        pub seen: Vec<Vec<u8>>,
        pub buffer_lengths: Vec<usize>,
        pub state: Option<GnssSnapshot>,
    }

    impl ScriptedParser {
        pub fn new(buffer_size: usize, steps: Vec<Step>) -> Self {
            Self {
                script: steps.into(),
                buffer_size,
                ..Self::default()
            }
        }
    }

    impl SentenceParser for ScriptedParser {
        fn required_buffer_size(&self) -> usize {
            self.buffer_size
        }

        fn parse(
            &mut self,
            sentence: &[u8],
            output: &mut [u8],
            errors: &mut dyn ErrorListener,
        ) -> ParseOutcome {
            self.seen.push(sentence.to_vec());
            self.buffer_lengths.push(output.len());

            if output.len() < self.buffer_size {
                errors.on_error(ErrorEvent::new(
                    ErrorCategory::Buffer,
                    ParseOutcome::BufferTooSmall.code(),
                    "output buffer too small",
                ));
                return ParseOutcome::BufferTooSmall;
            }

            let step = self.script.pop_front().unwrap_or_else(Step::ok);
            for event in step.events {
                errors.on_error(event);
            }
            step.outcome
        }
    }

    impl GnssSource for ScriptedParser {
        fn gnss_state(&self) -> Option<GnssSnapshot> {
            self.state
        }
    }
}
