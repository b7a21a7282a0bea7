//! Robocopy output parser and statistics engine

mod engine;
mod patterns;
mod rules;
mod size;

pub use engine::OutputParser;
pub use size::parse_size;

use crate::types::{CopyStatistics, ParseEvent};

/// Line-driven statistics engine.
///
/// The parser worker is generic over this so a different engine (or a test
/// double) can be driven through the same message protocol.
pub trait StatsEngine: Send + 'static {
    fn parse_line(&mut self, line: &str) -> Vec<ParseEvent>;
    fn reset(&mut self);
    fn snapshot(&self) -> CopyStatistics;
}

impl StatsEngine for OutputParser {
    fn parse_line(&mut self, line: &str) -> Vec<ParseEvent> {
        OutputParser::parse_line(self, line)
    }

    fn reset(&mut self) {
        OutputParser::reset(self)
    }

    fn snapshot(&self) -> CopyStatistics {
        OutputParser::snapshot(self)
    }
}
