//! Parser worker message protocol.

use robokit::parser::StatsEngine;
use robokit::worker::{ParserWorker, WorkerRequest, WorkerResponse};
use robokit::{CopyStatistics, OutputParser, ParseEvent};

async fn next(worker: &mut ParserWorker) -> WorkerResponse {
    worker.recv().await.expect("worker should still be running")
}

async fn ready_worker() -> ParserWorker {
    let mut worker = ParserWorker::spawn();
    assert_eq!(next(&mut worker).await, WorkerResponse::Ready);
    worker
}

/// Panics on any line containing "boom"; delegates everything else.
struct FaultyEngine(OutputParser);

impl StatsEngine for FaultyEngine {
    fn parse_line(&mut self, line: &str) -> Vec<ParseEvent> {
        if line.contains("boom") {
            panic!("engine fault on {line:?}");
        }
        self.0.parse_line(line)
    }

    fn reset(&mut self) {
        self.0.reset()
    }

    fn snapshot(&self) -> CopyStatistics {
        self.0.snapshot()
    }
}

#[tokio::test]
async fn test_ready_then_parse_line() {
    let mut worker = ready_worker().await;

    worker
        .send(WorkerRequest::ParseLine("  33%".to_string()))
        .await
        .unwrap();
    match next(&mut worker).await {
        WorkerResponse::ParseResult(events) => {
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].kind(), "progress");
        }
        other => panic!("unexpected response: {other:?}"),
    }

    worker.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unmatched_line_comes_back_as_log() {
    let mut worker = ready_worker().await;

    worker.handle().parse_line("hello").await.unwrap();
    assert_eq!(
        next(&mut worker).await,
        WorkerResponse::ParseResult(vec![ParseEvent::Log {
            line: "hello".to_string()
        }])
    );
}

#[tokio::test]
async fn test_batch_stats_and_reset() {
    let mut worker = ready_worker().await;
    let handle = worker.handle();

    handle
        .parse_batch(vec![
            "noise".to_string(),
            "    Dirs :  4  3  1  0  0  0".to_string(),
            "  60%".to_string(),
        ])
        .await
        .unwrap();
    match next(&mut worker).await {
        WorkerResponse::BatchResult(events) => {
            let kinds: Vec<_> = events.iter().map(ParseEvent::kind).collect();
            assert_eq!(kinds, vec!["dirs", "progress"]);
        }
        other => panic!("unexpected response: {other:?}"),
    }

    handle.send(WorkerRequest::GetStats).await.unwrap();
    match next(&mut worker).await {
        WorkerResponse::Stats(stats) => {
            assert_eq!(stats.total_dirs, 4);
            assert_eq!(stats.progress_percent, 60);
        }
        other => panic!("unexpected response: {other:?}"),
    }

    handle.send(WorkerRequest::Reset).await.unwrap();
    assert_eq!(
        next(&mut worker).await,
        WorkerResponse::ResetComplete(CopyStatistics::default())
    );
}

#[tokio::test]
async fn test_fault_in_batch_does_not_stop_the_rest() {
    let mut worker = ParserWorker::spawn_with(FaultyEngine(OutputParser::new()), 8);
    assert_eq!(next(&mut worker).await, WorkerResponse::Ready);

    worker
        .send(WorkerRequest::ParseBatch(vec![
            "  10%".to_string(),
            "boom".to_string(),
            "  20%".to_string(),
        ]))
        .await
        .unwrap();

    match next(&mut worker).await {
        WorkerResponse::Error { message, stack } => {
            assert!(message.contains("engine fault"));
            // Points at the engine's panic, not at the worker's catch site.
            let stack = stack.expect("panic origin recorded");
            assert!(stack.contains("worker_tests.rs"), "got {stack}");
        }
        other => panic!("expected error first, got {other:?}"),
    }
    match next(&mut worker).await {
        WorkerResponse::BatchResult(events) => assert_eq!(events.len(), 2),
        other => panic!("unexpected response: {other:?}"),
    }

    // The worker survives the fault and keeps its statistics.
    worker.send(WorkerRequest::GetStats).await.unwrap();
    match next(&mut worker).await {
        WorkerResponse::Stats(stats) => assert_eq!(stats.progress_percent, 20),
        other => panic!("unexpected response: {other:?}"),
    }
}

#[tokio::test]
async fn test_fault_on_single_line_is_error_response() {
    let mut worker = ParserWorker::spawn_with(FaultyEngine(OutputParser::new()), 8);
    assert_eq!(next(&mut worker).await, WorkerResponse::Ready);

    worker.handle().parse_line("boom").await.unwrap();
    assert!(next(&mut worker).await.is_error());

    worker.handle().parse_line("  5%").await.unwrap();
    assert!(matches!(next(&mut worker).await, WorkerResponse::ParseResult(_)));
}

#[tokio::test]
async fn test_worker_exits_when_handles_dropped() {
    let worker = ready_worker().await;
    let (handle, mut responses, task) = worker.into_parts();
    drop(handle);

    assert!(responses.recv().await.is_none());
    task.await.unwrap();
}
