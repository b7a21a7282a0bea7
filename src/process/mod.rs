//! External copy tool invocation

mod exit_code;
mod runner;

pub use exit_code::{exit_code_message, is_success, RunOutcome, FAILURE_THRESHOLD};
pub use runner::{forward_lines, run_process, split_output, DEFAULT_PROGRAM};
