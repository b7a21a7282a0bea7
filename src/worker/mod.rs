//! Background parser worker.
//!
//! Runs a [`StatsEngine`] on a dedicated blocking thread and talks to the
//! caller only through bounded channels:
//! - requests: `parse-line`, `parse-batch`, `reset`, `get-stats`
//! - responses: `ready` first, then one terminal reply per request, preceded
//!   by an `error` reply for each batch line whose processing faulted
//!
//! Every statistics payload is an owned snapshot; nothing mutable is shared.

use crate::parser::{OutputParser, StatsEngine};
use crate::types::{CopyStatistics, ParseEvent, RoboError};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::{Cell, RefCell};
use std::panic::{self, catch_unwind, AssertUnwindSafe};
use std::sync::Once;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Default bound for both request and response queues.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Message accepted by the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum WorkerRequest {
    ParseLine(String),
    ParseBatch(Vec<String>),
    Reset,
    GetStats,
}

/// Message produced by the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum WorkerResponse {
    Ready,
    /// Events for one line, including a `Log` event when nothing matched
    ParseResult(Vec<ParseEvent>),
    /// Update events for a whole batch, `Log` events removed
    BatchResult(Vec<ParseEvent>),
    ResetComplete(CopyStatistics),
    Stats(CopyStatistics),
    Error {
        message: String,
        stack: Option<String>,
    },
}

impl WorkerResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, WorkerResponse::Error { .. })
    }
}

/// Cloneable request side of a running worker.
#[derive(Debug, Clone)]
pub struct WorkerHandle {
    requests: mpsc::Sender<WorkerRequest>,
}

impl WorkerHandle {
    /// Queue a request. Waits while the queue is full.
    pub async fn send(&self, request: WorkerRequest) -> Result<(), RoboError> {
        self.requests
            .send(request)
            .await
            .map_err(|_| RoboError::Worker("parser worker has stopped".to_string()))
    }

    pub async fn parse_line(&self, line: impl Into<String>) -> Result<(), RoboError> {
        self.send(WorkerRequest::ParseLine(line.into())).await
    }

    pub async fn parse_batch(&self, lines: Vec<String>) -> Result<(), RoboError> {
        self.send(WorkerRequest::ParseBatch(lines)).await
    }
}

/// A running worker: request handle, response stream and its thread.
pub struct ParserWorker {
    handle: WorkerHandle,
    responses: mpsc::Receiver<WorkerResponse>,
    task: JoinHandle<()>,
}

impl ParserWorker {
    /// Start a worker around a fresh [`OutputParser`].
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn() -> Self {
        Self::spawn_with(OutputParser::new(), DEFAULT_QUEUE_CAPACITY)
    }

    /// Start a worker around any engine.
    pub fn spawn_with<E: StatsEngine>(engine: E, queue_capacity: usize) -> Self {
        let capacity = queue_capacity.max(1);
        let (request_tx, request_rx) = mpsc::channel(capacity);
        let (response_tx, response_rx) = mpsc::channel(capacity);

        let task = tokio::task::spawn_blocking(move || worker_loop(engine, request_rx, response_tx));

        Self {
            handle: WorkerHandle {
                requests: request_tx,
            },
            responses: response_rx,
            task,
        }
    }

    pub fn handle(&self) -> WorkerHandle {
        self.handle.clone()
    }

    pub async fn send(&self, request: WorkerRequest) -> Result<(), RoboError> {
        self.handle.send(request).await
    }

    /// Next response, or `None` once the worker has exited.
    pub async fn recv(&mut self) -> Option<WorkerResponse> {
        self.responses.recv().await
    }

    /// Split into producer and consumer halves for concurrent use.
    pub fn into_parts(self) -> (WorkerHandle, mpsc::Receiver<WorkerResponse>, JoinHandle<()>) {
        (self.handle, self.responses, self.task)
    }

    /// Close the request queue and wait for the worker thread to exit.
    ///
    /// Responses still queued are discarded.
    pub async fn shutdown(self) -> Result<(), RoboError> {
        let ParserWorker {
            handle,
            responses,
            task,
        } = self;
        drop(handle);
        drop(responses);
        task.await
            .map_err(|e| RoboError::Worker(format!("parser worker task failed: {}", e)))
    }
}

fn worker_loop<E: StatsEngine>(
    mut engine: E,
    mut requests: mpsc::Receiver<WorkerRequest>,
    responses: mpsc::Sender<WorkerResponse>,
) {
    if responses.blocking_send(WorkerResponse::Ready).is_err() {
        return;
    }

    while let Some(request) = requests.blocking_recv() {
        for response in handle_request(&mut engine, request) {
            if responses.blocking_send(response).is_err() {
                debug!("response receiver dropped, stopping parser worker");
                return;
            }
        }
    }
    // Every request handle is gone.
}

fn handle_request<E: StatsEngine>(engine: &mut E, request: WorkerRequest) -> Vec<WorkerResponse> {
    match request {
        WorkerRequest::ParseLine(line) => {
            vec![guarded(engine, |e| e.parse_line(&line))
                .map_or_else(|fault| fault, WorkerResponse::ParseResult)]
        }
        WorkerRequest::ParseBatch(lines) => {
            let mut responses = Vec::new();
            let mut events = Vec::new();
            for line in &lines {
                match guarded(engine, |e| e.parse_line(line)) {
                    Ok(line_events) => {
                        events.extend(line_events.into_iter().filter(ParseEvent::is_update))
                    }
                    Err(fault) => responses.push(fault),
                }
            }
            responses.push(WorkerResponse::BatchResult(events));
            responses
        }
        WorkerRequest::Reset => vec![guarded(engine, |e| {
            e.reset();
            e.snapshot()
        })
        .map_or_else(|fault| fault, WorkerResponse::ResetComplete)],
        WorkerRequest::GetStats => vec![guarded(engine, |e| e.snapshot())
            .map_or_else(|fault| fault, WorkerResponse::Stats)],
    }
}

thread_local! {
    /// Set while a guarded call runs on this thread.
    static GUARDED: Cell<bool> = const { Cell::new(false) };
    /// Stack recorded by the panic hook for the last guarded panic.
    static PANIC_STACK: RefCell<Option<String>> = const { RefCell::new(None) };
}

static PANIC_HOOK: Once = Once::new();

/// Chain a hook that records where a guarded panic happened.
///
/// Panics outside a guarded call go to the previous hook unchanged.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !GUARDED.with(Cell::get) {
                previous(info);
                return;
            }
            let mut stack = match info.location() {
                Some(location) => format!("panicked at {}", location),
                None => "panicked at unknown location".to_string(),
            };
            let backtrace = Backtrace::capture();
            if backtrace.status() == BacktraceStatus::Captured {
                stack.push('\n');
                stack.push_str(&backtrace.to_string());
            }
            PANIC_STACK.with(|slot| *slot.borrow_mut() = Some(stack));
        }));
    });
}

/// Run `f`, turning a panic into an `Error` response.
fn guarded<E, T>(engine: &mut E, f: impl FnOnce(&mut E) -> T) -> Result<T, WorkerResponse> {
    install_panic_hook();
    PANIC_STACK.with(|slot| slot.borrow_mut().take());

    GUARDED.with(|g| g.set(true));
    let result = catch_unwind(AssertUnwindSafe(|| f(engine)));
    GUARDED.with(|g| g.set(false));

    result.map_err(|payload| {
        let message = panic_message(payload.as_ref());
        let stack = PANIC_STACK.with(|slot| slot.borrow_mut().take());
        error!(%message, stack = stack.as_deref().unwrap_or(""), "parser fault");
        WorkerResponse::Error { message, stack }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown parser fault".to_string()
    }
}
