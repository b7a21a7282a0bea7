//! Ordered (pattern, handler) table
//!
//! Every rule is tried against every line. Rules do not exclude each other,
//! so one line may fire several of them.

use super::patterns;
use super::size::parse_size;
use crate::types::{CopyErrorRecord, CopyStatistics, CopyWarning, ParseEvent};
use chrono::Utc;
use regex::Captures;

/// What a rule changed, before it is paired with a snapshot.
#[derive(Debug, Clone)]
pub(crate) enum Change {
    Dirs,
    Files,
    Bytes,
    Time,
    Progress,
    Speed,
    File,
    Error(CopyErrorRecord),
    Warning(CopyWarning),
}

impl Change {
    pub(crate) fn into_event(self, stats: CopyStatistics) -> ParseEvent {
        match self {
            Change::Dirs => ParseEvent::Dirs { stats },
            Change::Files => ParseEvent::Files { stats },
            Change::Bytes => ParseEvent::Bytes { stats },
            Change::Time => ParseEvent::Time { stats },
            Change::Progress => ParseEvent::Progress { stats },
            Change::Speed => ParseEvent::Speed { stats },
            Change::File => ParseEvent::File { stats },
            Change::Error(error) => ParseEvent::Error { error, stats },
            Change::Warning(warning) => ParseEvent::Warning { warning, stats },
        }
    }
}

pub(crate) struct Rule {
    pub name: &'static str,
    pub apply: fn(&mut CopyStatistics, &str) -> Option<Change>,
}

/// Evaluation order matters: a percentage token on the same line as a byte
/// summary overrides the byte-derived progress.
pub(crate) static RULES: [Rule; 9] = [
    Rule { name: "dirs", apply: dirs },
    Rule { name: "files", apply: files },
    Rule { name: "bytes", apply: bytes },
    Rule { name: "time", apply: time },
    Rule { name: "progress", apply: progress },
    Rule { name: "speed", apply: speed },
    Rule { name: "file", apply: current_file },
    Rule { name: "error", apply: error },
    Rule { name: "warning", apply: warning },
];

fn count(caps: &Captures<'_>, group: usize) -> u64 {
    caps.get(group)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn dirs(stats: &mut CopyStatistics, line: &str) -> Option<Change> {
    let caps = patterns::DIRS.captures(line)?;
    stats.total_dirs = count(&caps, 1);
    stats.copied_dirs = count(&caps, 2);
    Some(Change::Dirs)
}

fn files(stats: &mut CopyStatistics, line: &str) -> Option<Change> {
    let caps = patterns::FILES.captures(line)?;
    stats.total_files = count(&caps, 1);
    stats.copied_files = count(&caps, 2);
    stats.skipped_files = count(&caps, 3);
    stats.failed_files = count(&caps, 5);
    Some(Change::Files)
}

fn bytes(stats: &mut CopyStatistics, line: &str) -> Option<Change> {
    let caps = patterns::BYTES.captures(line)?;
    stats.total_bytes = parse_size(&caps[1]);
    stats.copied_bytes = parse_size(&caps[2]);
    stats.recompute_byte_progress();
    Some(Change::Bytes)
}

fn time(stats: &mut CopyStatistics, line: &str) -> Option<Change> {
    let caps = patterns::TIMES.captures(line)?;
    stats.time_elapsed = caps
        .get(1)
        .map_or("0:00:00", |m| m.as_str())
        .to_string();
    Some(Change::Time)
}

fn progress(stats: &mut CopyStatistics, line: &str) -> Option<Change> {
    let caps = patterns::PERCENTAGE.captures(line)?;
    let percentage: f64 = caps[1].parse().ok()?;
    if !(0.0..=100.0).contains(&percentage) {
        return None;
    }
    stats.progress_percent = percentage.round() as u8;
    Some(Change::Progress)
}

fn speed_unit(raw: &str) -> &'static str {
    match raw.to_ascii_lowercase().chars().next() {
        Some('k') => "KB",
        Some('m') => "MB",
        Some('g') => "GB",
        Some('t') => "TB",
        _ => "Bytes",
    }
}

fn speed(stats: &mut CopyStatistics, line: &str) -> Option<Change> {
    let caps = patterns::SPEED.captures(line)?;
    stats.speed = format!("{} {}/s", &caps[1], speed_unit(&caps[2]));
    Some(Change::Speed)
}

fn current_file(stats: &mut CopyStatistics, line: &str) -> Option<Change> {
    let caps = patterns::NEW_FILE
        .captures(line)
        .or_else(|| patterns::EXTRA_FILE.captures(line))?;
    let name = caps.get(caps.len() - 1)?;
    stats.current_file = name.as_str().trim().to_string();
    Some(Change::File)
}

fn error(stats: &mut CopyStatistics, line: &str) -> Option<Change> {
    let record = match patterns::ERROR.captures(line) {
        Some(caps) => CopyErrorRecord {
            code: caps[1].to_string(),
            hex_code: caps[2].to_string(),
            message: caps[3].to_string(),
            timestamp: Utc::now(),
        },
        None if line.to_lowercase().contains("error") => CopyErrorRecord::unstructured(line),
        None => return None,
    };
    stats.push_error(record.clone());
    Some(Change::Error(record))
}

fn warning(stats: &mut CopyStatistics, line: &str) -> Option<Change> {
    let lower = line.to_lowercase();
    if !lower.contains("warning") && !lower.contains("access denied") {
        return None;
    }
    let record = CopyWarning {
        message: line.to_string(),
        timestamp: Utc::now(),
    };
    stats.push_warning(record.clone());
    Some(Change::Warning(record))
}
