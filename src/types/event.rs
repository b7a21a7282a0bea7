//! ParseEvent - What one output line changed

use super::stats::{CopyErrorRecord, CopyStatistics, CopyWarning};
use serde::{Deserialize, Serialize};

/// Point-in-time notification produced by the output parser.
///
/// Every variant except `Log` owns a snapshot of the statistics taken right
/// after its own update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ParseEvent {
    Dirs { stats: CopyStatistics },
    Files { stats: CopyStatistics },
    Bytes { stats: CopyStatistics },
    Time { stats: CopyStatistics },
    Progress { stats: CopyStatistics },
    Speed { stats: CopyStatistics },
    File { stats: CopyStatistics },
    Error {
        error: CopyErrorRecord,
        stats: CopyStatistics,
    },
    Warning {
        warning: CopyWarning,
        stats: CopyStatistics,
    },
    /// Line matched nothing
    Log { line: String },
}

impl ParseEvent {
    /// Short name of the event kind
    pub fn kind(&self) -> &'static str {
        match self {
            ParseEvent::Dirs { .. } => "dirs",
            ParseEvent::Files { .. } => "files",
            ParseEvent::Bytes { .. } => "bytes",
            ParseEvent::Time { .. } => "time",
            ParseEvent::Progress { .. } => "progress",
            ParseEvent::Speed { .. } => "speed",
            ParseEvent::File { .. } => "file",
            ParseEvent::Error { .. } => "error",
            ParseEvent::Warning { .. } => "warning",
            ParseEvent::Log { .. } => "log",
        }
    }

    /// Whether this event reflects a statistics change
    pub fn is_update(&self) -> bool {
        !matches!(self, ParseEvent::Log { .. })
    }

    /// Snapshot carried by the event, if any
    pub fn stats(&self) -> Option<&CopyStatistics> {
        match self {
            ParseEvent::Dirs { stats }
            | ParseEvent::Files { stats }
            | ParseEvent::Bytes { stats }
            | ParseEvent::Time { stats }
            | ParseEvent::Progress { stats }
            | ParseEvent::Speed { stats }
            | ParseEvent::File { stats }
            | ParseEvent::Error { stats, .. }
            | ParseEvent::Warning { stats, .. } => Some(stats),
            ParseEvent::Log { .. } => None,
        }
    }
}
