//! # Parse Session
//!
//! Wires an external [`SentenceParser`] to an [`ErrorTracker`]: every sentence
//! is parsed, callback errors are recorded as they arrive, and the final
//! outcome updates session health.
//!
//! A session takes `&mut self` for every submission, so a single session is
//! always driven by one writer. Use one session per input stream.

use tracing::{debug, warn};

use crate::parser::{ErrorEvent, ErrorListener, GnssSource, SentenceParser};
use crate::quality::{Assessment, QualityAdvisor};
use crate::tracker::{
    Clock, DiagnosticSink, ErrorTracker, HealthTransition, MonotonicClock, ParseOutcome, Stats,
    TracingSink,
};

/// Result of submitting one sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub outcome: ParseOutcome,
    pub transition: HealthTransition,
}

/// Forwards parser callback errors into the tracker, timestamped on arrival
struct TrackerListener<'a, C: Clock, S: DiagnosticSink> {
    tracker: &'a mut ErrorTracker<S>,
    clock: &'a C,
}

impl<C: Clock, S: DiagnosticSink> ErrorListener for TrackerListener<'_, C, S> {
    fn on_error(&mut self, event: ErrorEvent) {
        self.tracker
            .record_error(event.category, event.code, &event.message, self.clock.now_ms());
    }
}

/// One parser, one tracker and one clock for the lifetime of a connection
#[derive(Debug)]
pub struct ParseSession<P, C = MonotonicClock, S = TracingSink>
where
    P: SentenceParser,
    C: Clock,
    S: DiagnosticSink,
{
    parser: P,
    tracker: ErrorTracker<S>,
    clock: C,
    /// Parser output area, sized from `required_buffer_size`
    buffer: Vec<u8>,
}

impl<P, C, S> ParseSession<P, C, S>
where
    P: SentenceParser,
    C: Clock,
    S: DiagnosticSink,
{
    /// Creates a session with an output buffer of the size the parser asks for
    pub fn new(parser: P, tracker: ErrorTracker<S>, clock: C) -> Self {
        let size = parser.required_buffer_size();
        Self::with_buffer_size(parser, tracker, clock, size)
    }

    /// Creates a session with an explicit output buffer size.
    ///
    /// A size below `required_buffer_size` makes every parse report
    /// `BufferTooSmall`.
    pub fn with_buffer_size(parser: P, tracker: ErrorTracker<S>, clock: C, size: usize) -> Self {
        let required = parser.required_buffer_size();
        if size < required {
            warn!(size, required, "parser output buffer is smaller than required");
        }

        Self {
            parser,
            tracker,
            clock,
            buffer: vec![0; size],
        }
    }

    /// Parses one candidate sentence and records everything it reported.
    ///
    /// Callback errors are recorded first, then the outcome.
    pub fn submit(&mut self, sentence: &[u8]) -> Submission {
        let mut listener = TrackerListener {
            tracker: &mut self.tracker,
            clock: &self.clock,
        };
        let outcome = self.parser.parse(sentence, &mut self.buffer, &mut listener);
        let transition = self.tracker.record_outcome(outcome);

        match transition {
            HealthTransition::Degraded => warn!(
                %outcome,
                consecutive_errors = self.tracker.consecutive_errors(),
                "parser session became unhealthy"
            ),
            HealthTransition::Recovered | HealthTransition::Unchanged => {
                debug!(%outcome, "sentence processed")
            }
        }

        Submission {
            outcome,
            transition,
        }
    }

    /// Parser output from the most recent submission
    pub fn output(&self) -> &[u8] {
        &self.buffer
    }

    pub fn stats(&self) -> Stats {
        self.tracker.snapshot()
    }

    pub fn is_healthy(&self) -> bool {
        self.tracker.is_healthy()
    }

    pub fn tracker(&self) -> &ErrorTracker<S> {
        &self.tracker
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Ends the session, handing back its parts
    pub fn into_parts(self) -> (P, ErrorTracker<S>, C) {
        (self.parser, self.tracker, self.clock)
    }
}

impl<P, C, S> ParseSession<P, C, S>
where
    P: SentenceParser + GnssSource,
    C: Clock,
    S: DiagnosticSink,
{
    /// Rates the parser's current GNSS state; `None` until a fix has been parsed
    pub fn assess_fix(&self) -> Option<Assessment> {
        self.parser
            .gnss_state()
            .map(|snapshot| QualityAdvisor::assess(&snapshot))
    }
}
