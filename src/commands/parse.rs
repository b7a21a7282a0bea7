//! `parse` command: replay a saved robocopy log through the parser

use crate::parser::OutputParser;
use crate::process::split_output;
use crate::types::{CopyStatistics, RoboError};
use std::fs;
use std::path::Path;
use tracing::info;

use super::{format_error_summary, format_stats_summary, print_json};

/// Feed every line of `text` to a fresh parser and return the final statistics.
pub fn parse_log(text: &str) -> CopyStatistics {
    let mut parser = OutputParser::new();
    let mut lines = 0usize;
    for line in split_output(text) {
        parser.parse_line(line);
        lines += 1;
    }
    info!(lines, "log replayed");
    parser.snapshot()
}

pub fn run(path: &Path, json: bool) -> Result<CopyStatistics, RoboError> {
    // Logs written with /UNILOG are not UTF-8; decode lossily rather than fail.
    let bytes = fs::read(path)?;
    let stats = parse_log(&String::from_utf8_lossy(&bytes));

    if json {
        print_json(&stats)?;
    } else {
        println!("{}", format_stats_summary(&stats));
        if !stats.errors.is_empty() {
            println!("{}", format_error_summary(&stats.errors));
        }
    }
    Ok(stats)
}
