//! # robokit - Robocopy front-end core
//!
//! Safe arguments in, live statistics out.
//!
//! Sanitizes untrusted copy options, builds the robocopy argument vector,
//! runs the tool and turns its console output into structured statistics
//! on a background worker.

// Module declarations
pub mod args;
pub mod commands;
pub mod config;
pub mod logging;
pub mod parser;
pub mod process;
pub mod sanitize;
pub mod schedule;
pub mod types;
pub mod ui;
pub mod worker;

// Re-export commonly used types
pub use args::ArgumentList;
pub use config::Config;
pub use parser::OutputParser;
pub use process::RunOutcome;
pub use types::{CopyRequest, CopyStatistics, ParseEvent, RoboError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
