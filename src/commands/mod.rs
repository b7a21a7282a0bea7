//! Subcommand implementations

pub mod args;
pub mod parse;
pub mod run;
pub mod task;

use crate::types::{CopyErrorRecord, CopyStatistics, RoboError};
use indicatif::HumanBytes;
use serde::Serialize;
use std::collections::BTreeMap;

/// Print any serializable value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), RoboError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| RoboError::Config(format!("Failed to encode JSON output: {}", e)))?;
    println!("{}", text);
    Ok(())
}

/// Multi-line summary of final statistics.
pub(crate) fn format_stats_summary(stats: &CopyStatistics) -> String {
    let mut lines = vec![
        "Summary:".to_string(),
        format!(
            "  Dirs:     {} copied of {}",
            stats.copied_dirs, stats.total_dirs
        ),
        format!(
            "  Files:    {} copied of {} ({} skipped, {} failed)",
            stats.copied_files, stats.total_files, stats.skipped_files, stats.failed_files
        ),
        format!(
            "  Bytes:    {} of {} ({}%)",
            HumanBytes(stats.copied_bytes),
            HumanBytes(stats.total_bytes),
            stats.progress_percent
        ),
    ];
    if !stats.speed.is_empty() {
        lines.push(format!("  Speed:    {}", stats.speed));
    }
    if !stats.time_elapsed.is_empty() {
        lines.push(format!("  Elapsed:  {}", stats.time_elapsed));
    }
    lines.push(format!(
        "  Issues:   {} error(s), {} warning(s)",
        stats.errors.len(),
        stats.warnings.len()
    ));
    lines.join("\n")
}

/// Errors grouped by robocopy code, at most three messages per group.
pub(crate) fn format_error_summary(errors: &[CopyErrorRecord]) -> String {
    let mut groups: BTreeMap<&str, Vec<&CopyErrorRecord>> = BTreeMap::new();
    for record in errors {
        groups.entry(record.code.as_str()).or_default().push(record);
    }

    let mut lines = Vec::new();
    lines.push("Error summary:".to_string());
    for (code, items) in groups {
        let hex = items.first().map(|r| r.hex_code.as_str()).unwrap_or_default();
        if hex.is_empty() {
            lines.push(format!("  code {} ({}):", code, items.len()));
        } else {
            lines.push(format!("  code {} {} ({}):", code, hex, items.len()));
        }
        for record in items.iter().take(3) {
            lines.push(format!("    - {}", record.message));
        }
        if items.len() > 3 {
            lines.push(format!("    - ... {} more", items.len() - 3));
        }
    }
    lines.join("\n")
}
