//! CopyStatistics - Running tally for one robocopy operation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One error line reported by robocopy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyErrorRecord {
    /// Decimal Win32 code, or `"unknown"` for unstructured error lines
    pub code: String,
    /// Hex form as printed by robocopy (`0x00000005`), empty if unknown
    pub hex_code: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl CopyErrorRecord {
    /// Error record for a line that mentions an error but has no code.
    pub fn unstructured(line: &str) -> Self {
        Self {
            code: "unknown".to_string(),
            hex_code: String::new(),
            message: line.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// One warning line reported by robocopy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyWarning {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Mutable statistics for a single copy operation.
///
/// Byte counters are absolute byte counts, already expanded from robocopy's
/// `k/m/g/t` suffixes.
///
/// Error and warning history is shared between clones and copied only when
/// a clone appends while another still holds it, so snapshots stay cheap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyStatistics {
    pub total_dirs: u64,
    pub copied_dirs: u64,
    pub total_files: u64,
    pub copied_files: u64,
    pub failed_files: u64,
    pub skipped_files: u64,
    pub total_bytes: u64,
    pub copied_bytes: u64,

    pub errors: Arc<Vec<CopyErrorRecord>>,
    pub warnings: Arc<Vec<CopyWarning>>,

    pub current_file: String,
    /// 0..=100
    pub progress_percent: u8,
    pub speed: String,
    pub time_elapsed: String,
}

impl CopyStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any error line has been seen
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn push_error(&mut self, record: CopyErrorRecord) {
        Arc::make_mut(&mut self.errors).push(record);
    }

    pub fn push_warning(&mut self, warning: CopyWarning) {
        Arc::make_mut(&mut self.warnings).push(warning);
    }

    /// Recompute progress from byte counters. No-op while the total is unknown.
    pub fn recompute_byte_progress(&mut self) {
        if self.total_bytes > 0 {
            let ratio = self.copied_bytes as f64 / self.total_bytes as f64;
            self.progress_percent = (ratio * 100.0).round().clamp(0.0, 100.0) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_statistics_are_blank() {
        let stats = CopyStatistics::new();
        assert_eq!(stats.total_dirs, 0);
        assert_eq!(stats.copied_bytes, 0);
        assert_eq!(stats.progress_percent, 0);
        assert!(stats.current_file.is_empty());
        assert!(!stats.has_errors());
    }

    #[test]
    fn test_recompute_byte_progress_rounds() {
        let mut stats = CopyStatistics {
            total_bytes: 3,
            copied_bytes: 2,
            ..Default::default()
        };
        stats.recompute_byte_progress();
        assert_eq!(stats.progress_percent, 67);
    }

    #[test]
    fn test_recompute_byte_progress_ignores_zero_total() {
        let mut stats = CopyStatistics {
            progress_percent: 12,
            copied_bytes: 50,
            ..Default::default()
        };
        stats.recompute_byte_progress();
        assert_eq!(stats.progress_percent, 12);
    }

    #[test]
    fn test_snapshot_shares_history_until_append() {
        let mut stats = CopyStatistics::new();
        stats.push_error(CopyErrorRecord::unstructured("error one"));

        let snapshot = stats.clone();
        assert!(Arc::ptr_eq(&stats.errors, &snapshot.errors));

        stats.push_error(CopyErrorRecord::unstructured("error two"));
        assert_eq!(stats.errors.len(), 2);
        assert_eq!(snapshot.errors.len(), 1);
        assert!(!Arc::ptr_eq(&stats.errors, &snapshot.errors));
    }

    #[test]
    fn test_append_without_live_snapshot_reuses_storage() {
        let mut stats = CopyStatistics::new();
        stats.push_warning(CopyWarning {
            message: "warning one".to_string(),
            timestamp: Utc::now(),
        });
        let before = Arc::as_ptr(&stats.warnings);

        drop(stats.clone());
        stats.push_warning(CopyWarning {
            message: "warning two".to_string(),
            timestamp: Utc::now(),
        });
        assert_eq!(Arc::as_ptr(&stats.warnings), before);
        assert_eq!(stats.warnings.len(), 2);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(CopyStatistics::new()).unwrap();
        assert!(json.get("totalDirs").is_some());
        assert!(json.get("progressPercent").is_some());
        assert!(json.get("total_dirs").is_none());
    }
}
