//! Robocopy exit-code contract
//!
//! Robocopy's exit code is a bit set: 1 = files copied, 2 = extra files,
//! 4 = mismatches, 8 = copy failures. Anything below 8 is a benign outcome.

use serde::{Deserialize, Serialize};

/// First code that signals failure.
pub const FAILURE_THRESHOLD: i32 = 8;

/// Result of one finished invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub success: bool,
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub message: String,
}

impl RunOutcome {
    pub fn from_code(code: Option<i32>) -> Self {
        match code {
            Some(code) => Self {
                success: is_success(code),
                code: Some(code),
                message: exit_code_message(code),
            },
            None => Self {
                success: false,
                code: None,
                message: "Process was terminated before reporting an exit code".to_string(),
            },
        }
    }
}

pub fn is_success(code: i32) -> bool {
    (0..FAILURE_THRESHOLD).contains(&code)
}

/// Human-readable description of an exit code.
pub fn exit_code_message(code: i32) -> String {
    let message = match code {
        0 => "No files were copied. No failures were encountered.",
        1 => "All files were copied successfully.",
        2 => "Extra files or directories were detected.",
        3 => "Files were copied and extra files/directories were detected.",
        4 => "Some Mismatched files or directories were detected.",
        5 => "Some files were copied. Some files were mismatched.",
        6 => "Additional files and mismatched files exist.",
        7 => "Files were copied, additional files and mismatched files exist.",
        8 => "Several files did not copy (failure/access denied).",
        other => return format!("Process exited with code {}", other),
    };
    message.to_string()
}
