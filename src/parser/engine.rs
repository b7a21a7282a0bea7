//! OutputParser - Statistics engine for one copy operation

use super::rules::RULES;
use crate::types::{CopyStatistics, ParseEvent};
use tracing::trace;

/// Owns the live statistics of a single robocopy run.
///
/// Construct one per operation (or call [`OutputParser::reset`] between
/// operations). Instances share nothing, so independent runs can be parsed
/// side by side.
#[derive(Debug, Default)]
pub struct OutputParser {
    stats: CopyStatistics,
}

impl OutputParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one line of output.
    ///
    /// Returns one event per rule that fired, each with its own snapshot, or
    /// a single `Log` event when nothing matched. Never fails.
    pub fn parse_line(&mut self, line: &str) -> Vec<ParseEvent> {
        let mut events = Vec::new();
        for rule in RULES.iter() {
            if let Some(change) = (rule.apply)(&mut self.stats, line) {
                trace!(rule = rule.name, "rule fired");
                events.push(change.into_event(self.stats.clone()));
            }
        }

        if events.is_empty() {
            events.push(ParseEvent::Log {
                line: line.to_string(),
            });
        }
        events
    }

    /// Apply lines in order, keeping only events that changed statistics.
    pub fn parse_batch<S: AsRef<str>>(&mut self, lines: &[S]) -> Vec<ParseEvent> {
        let mut events = Vec::new();
        for line in lines {
            events.extend(
                self.parse_line(line.as_ref())
                    .into_iter()
                    .filter(ParseEvent::is_update),
            );
        }
        events
    }

    /// Zero every counter and clear error/warning history.
    pub fn reset(&mut self) {
        self.stats = CopyStatistics::default();
    }

    pub fn stats(&self) -> &CopyStatistics {
        &self.stats
    }

    /// Owned copy of the current statistics.
    pub fn snapshot(&self) -> CopyStatistics {
        self.stats.clone()
    }
}
