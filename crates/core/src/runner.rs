//! Simulated-work task execution.
//!
//! A task records its worker in the registry, sleeps for its configured
//! delay, and reports a result naming the worker that ran it. The sleep
//! stands in for blocking work such as a database query or remote call.

use crate::{
    error::{Error, Result},
    registry::TaskRegistry,
};
use compact_str::{CompactString, format_compact};
use serde::Serialize;
use std::{sync::Arc, time::Duration};
use tokio::time;

/// Outcome of one simulated task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskResult {
    /// Task identifier.
    pub task_id: u64,
    /// Identity of the worker that executed the task.
    pub worker: CompactString,
    /// Human-readable completion message.
    pub message: String,
}

/// Identity of the worker thread currently executing the caller.
///
/// Identities are reused: the runtime maps many tasks onto a small pool
/// of worker threads, so consecutive tasks often report the same worker.
pub fn worker_identity() -> CompactString {
    let thread = std::thread::current();
    format_compact!("{}/{:?}", thread.name().unwrap_or("unnamed"), thread.id())
}

/// Run one simulated task on the caller's own execution context.
///
/// Records the worker in `registry`, suspends for `delay` (zero means
/// no suspension), and returns the result. The caller waits out the
/// full delay; use [`spawn`] to detach the work instead.
pub async fn run(registry: &TaskRegistry, task_id: u64, delay: Duration) -> TaskResult {
    let worker = worker_identity();
    let delay_ms = delay.as_millis();
    tracing::debug!("task {task_id} started on {worker} ({delay_ms}ms)");
    registry.record(worker.clone(), format!("task-{task_id} ({delay_ms}ms)"));

    time::sleep(delay).await;

    let message = format!("task {task_id} completed after {delay_ms}ms on {worker}");
    tracing::debug!("task {task_id} completed");
    TaskResult {
        task_id,
        worker,
        message,
    }
}

/// Handle to a task detached onto its own runtime task.
pub struct SpawnedTask {
    task_id: u64,
    handle: tokio::task::JoinHandle<TaskResult>,
}

impl SpawnedTask {
    /// Id of the underlying task.
    pub fn task_id(&self) -> u64 {
        self.task_id
    }

    /// Abort the task. Join the handle afterwards to observe the
    /// cancellation error.
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Wait for the task to finish.
    ///
    /// A task aborted mid-delay yields [`Error::Cancelled`] rather than
    /// a fabricated result.
    pub async fn join(self) -> Result<TaskResult> {
        self.handle
            .await
            .map_err(|e| Error::from_join(self.task_id, e))
    }
}

/// Detach one simulated task onto a new runtime task.
///
/// The same work as [`run`], but the caller is not suspended; the
/// returned handle resolves to the result once the delay elapses.
pub fn spawn(registry: Arc<TaskRegistry>, task_id: u64, delay: Duration) -> SpawnedTask {
    let handle = tokio::spawn(async move { run(&registry, task_id, delay).await });
    SpawnedTask { task_id, handle }
}

/// Fixed stage delays for the composite task. Not configurable.
const DB_QUERY_DELAY: Duration = Duration::from_millis(1000);
const REMOTE_CALL_DELAY: Duration = Duration::from_millis(2000);
const FILE_OP_DELAY: Duration = Duration::from_millis(500);

/// Run three simulated blocking stages strictly in sequence on one
/// task: a database query, a remote call, and a file operation.
///
/// Each stage suspends only the calling task; sibling tasks keep
/// running through all three delays. The returned message concatenates
/// the three stage statuses in order.
pub async fn run_composite(task_id: u64) -> String {
    tracing::info!("composite task {task_id} started");
    let db = stage(task_id, "db-query", DB_QUERY_DELAY).await;
    let remote = stage(task_id, "remote-call", REMOTE_CALL_DELAY).await;
    let file = stage(task_id, "file-op", FILE_OP_DELAY).await;

    let message = format!("task {task_id} finished: {db} | {remote} | {file}");
    tracing::info!("composite task {task_id} finished");
    message
}

async fn stage(task_id: u64, name: &str, delay: Duration) -> String {
    tracing::debug!("task {task_id}: {name} ({}ms)", delay.as_millis());
    time::sleep(delay).await;
    format!("{name}-ok")
}
