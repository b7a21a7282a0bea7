//! Progress reporting

use crate::process::RunOutcome;
use crate::types::{CopyStatistics, ParseEvent};
use indicatif::{HumanBytes, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Terminal renderer for parser events
pub struct ProgressReporter {
    bar: ProgressBar,
    errors_shown: usize,
    warnings_shown: usize,
}

impl ProgressReporter {
    /// Create a new progress reporter drawing to stderr
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new(100))
    }

    /// Reporter that keeps state but draws nothing (for `--json` output)
    pub fn hidden() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_draw_target(ProgressDrawTarget::hidden());
        Self::with_bar(bar)
    }

    fn with_bar(bar: ProgressBar) -> Self {
        if let Ok(style) = ProgressStyle::with_template("{bar:30.cyan/blue} {pos:>3}% | {msg}") {
            bar.set_style(style.progress_chars("=>-"));
        }
        Self {
            bar,
            errors_shown: 0,
            warnings_shown: 0,
        }
    }

    /// Apply one parser event.
    pub fn apply(&mut self, event: &ParseEvent) {
        match event {
            ParseEvent::Error { error, .. } => {
                self.errors_shown += 1;
                self.bar
                    .println(format!("ERROR {} {}: {}", error.code, error.hex_code, error.message));
            }
            ParseEvent::Warning { warning, .. } => {
                self.warnings_shown += 1;
                self.bar.println(format!("WARNING {}", warning.message));
            }
            _ => {}
        }

        if let Some(stats) = event.stats() {
            self.update(stats);
        }
    }

    fn update(&self, stats: &CopyStatistics) {
        self.bar.set_position(u64::from(stats.progress_percent));

        let mut msg = if stats.current_file.is_empty() {
            "Copying...".to_string()
        } else {
            stats.current_file.clone()
        };
        if !stats.speed.is_empty() {
            msg.push_str(&format!(" | {}", stats.speed));
        }
        self.bar.set_message(msg);
    }

    /// Finalize with the exit outcome and a summary of the statistics.
    pub fn finish(&self, stats: &CopyStatistics, outcome: &RunOutcome) {
        let summary = format!(
            "{} | dirs {}/{} | files {}/{} ({} skipped, {} failed) | {} of {}",
            outcome.message,
            stats.copied_dirs,
            stats.total_dirs,
            stats.copied_files,
            stats.total_files,
            stats.skipped_files,
            stats.failed_files,
            HumanBytes(stats.copied_bytes),
            HumanBytes(stats.total_bytes),
        );
        if outcome.success {
            self.bar.finish_with_message(summary);
        } else {
            self.bar.abandon_with_message(summary);
        }
    }

    pub fn errors_shown(&self) -> usize {
        self.errors_shown
    }

    pub fn warnings_shown(&self) -> usize {
        self.warnings_shown
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}
