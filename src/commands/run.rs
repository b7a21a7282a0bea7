//! `run` command: invoke robocopy and report live statistics
//!
//! Data flow:
//! ```text
//! child stdout/stderr -> line channel -> parser worker -> responses -> reporter
//! ```

use crate::config::Config;
use crate::process::{run_process, RunOutcome};
use crate::types::{CopyStatistics, RoboError};
use crate::ui::ProgressReporter;
use crate::worker::{ParserWorker, WorkerRequest, WorkerResponse, DEFAULT_QUEUE_CAPACITY};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinError;
use tracing::{debug, info, warn};

use super::args::build_arguments;
use super::{format_error_summary, print_json};

/// Everything a finished run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub args: Vec<String>,
    pub outcome: RunOutcome,
    pub stats: CopyStatistics,
}

/// Run the copy and print the report.
pub async fn run(config: &Config) -> Result<RunReport, RoboError> {
    let report = execute(config).await?;

    if config.json {
        print_json(&report)?;
    } else if !report.stats.errors.is_empty() {
        println!("{}", format_error_summary(&report.stats.errors));
    }
    Ok(report)
}

/// Run the copy without printing the final report.
pub async fn execute(config: &Config) -> Result<RunReport, RoboError> {
    let args = build_arguments(config)?;
    let reporter = if config.json {
        ProgressReporter::hidden()
    } else {
        ProgressReporter::new()
    };

    let (handle, mut responses, worker_task) = ParserWorker::spawn().into_parts();
    let (line_tx, mut line_rx) = mpsc::channel::<String>(DEFAULT_QUEUE_CAPACITY);

    let forwarder = {
        let handle = handle.clone();
        tokio::spawn(async move {
            while let Some(line) = line_rx.recv().await {
                if handle.parse_line(line).await.is_err() {
                    break;
                }
            }
        })
    };

    let consumer = tokio::spawn(async move {
        let mut reporter = reporter;
        let mut final_stats = None;
        while let Some(response) = responses.recv().await {
            match response {
                WorkerResponse::Ready => debug!("parser worker ready"),
                WorkerResponse::ParseResult(events) | WorkerResponse::BatchResult(events) => {
                    for event in &events {
                        reporter.apply(event);
                    }
                }
                WorkerResponse::Error { message, .. } => {
                    warn!(%message, "parser worker reported a fault")
                }
                WorkerResponse::ResetComplete(_) => {}
                WorkerResponse::Stats(stats) => {
                    final_stats = Some(stats);
                    break;
                }
            }
        }
        (reporter, final_stats)
    });

    let result = run_process(&config.program, &args, line_tx).await;
    forwarder.await.map_err(worker_failed)?;

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            drop(handle);
            let _ = consumer.await;
            let _ = worker_task.await;
            return Err(e);
        }
    };

    // Every line is queued ahead of this request, so Stats is the last reply.
    handle.send(WorkerRequest::GetStats).await?;
    drop(handle);

    let (reporter, stats) = consumer.await.map_err(worker_failed)?;
    worker_task.await.map_err(worker_failed)?;
    let stats = stats
        .ok_or_else(|| RoboError::Worker("parser worker exited before reporting".to_string()))?;

    reporter.finish(&stats, &outcome);
    info!(
        code = ?outcome.code,
        errors = reporter.errors_shown(),
        warnings = reporter.warnings_shown(),
        "run finished"
    );

    Ok(RunReport {
        args: args.into_vec(),
        outcome,
        stats,
    })
}

fn worker_failed(e: JoinError) -> RoboError {
    RoboError::Worker(format!("pipeline task failed: {}", e))
}
