//! CopyRequest - A sanitized robocopy invocation

use serde::{Deserialize, Serialize};

/// Default file selection pattern (robocopy's own default).
pub const DEFAULT_FILE_PATTERN: &str = "*.*";

/// Validated description of one copy operation.
///
/// Only [`crate::sanitize::sanitize`] builds these from untrusted input; the
/// argument builder assumes every field already passed its whitelist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyRequest {
    pub source: String,
    pub destination: String,
    pub file_pattern: String,

    /// `/S`
    pub recurse: bool,
    /// `/E`
    pub copy_empty_dirs: bool,
    /// `/LEV:n`, 0 = unlimited
    pub levels: u32,

    pub restart_mode: bool,
    pub backup_mode: bool,
    pub copy_all: bool,
    pub mirror: bool,
    pub move_files: bool,
    pub move_dirs: bool,

    pub copy_archive: bool,
    pub reset_archive: bool,
    pub include_attributes: String,
    pub exclude_attributes: String,

    /// Comma-separated file names or wildcards
    pub exclude_files: String,
    /// Comma-separated directory names or wildcards
    pub exclude_dirs: String,

    pub retries: u32,
    pub wait_seconds: u32,

    pub verbose: bool,
    pub no_progress: bool,
    pub show_eta: bool,

    pub multi_thread: bool,
    pub thread_count: u32,
}

impl Default for CopyRequest {
    fn default() -> Self {
        Self {
            source: String::new(),
            destination: String::new(),
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            recurse: false,
            copy_empty_dirs: false,
            levels: 0,
            restart_mode: false,
            backup_mode: false,
            copy_all: false,
            mirror: false,
            move_files: false,
            move_dirs: false,
            copy_archive: false,
            reset_archive: false,
            include_attributes: String::new(),
            exclude_attributes: String::new(),
            exclude_files: String::new(),
            exclude_dirs: String::new(),
            retries: 0,
            wait_seconds: 0,
            verbose: false,
            no_progress: false,
            show_eta: false,
            multi_thread: false,
            thread_count: 0,
        }
    }
}

impl CopyRequest {
    /// True when the pattern adds nothing over robocopy's default.
    pub fn has_default_pattern(&self) -> bool {
        self.file_pattern.is_empty() || self.file_pattern == DEFAULT_FILE_PATTERN
    }
}
