//! Fan-out coordination: launching a batch of delay tasks at once and
//! collecting every result.

use crate::{
    error::{Error, Result},
    registry::TaskRegistry,
    runner::{self, TaskResult},
};
use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use tokio::time::Instant;

/// Launches batches of simulated tasks and assigns process-unique ids.
pub struct Coordinator {
    registry: Arc<TaskRegistry>,
    next_task_id: AtomicU64,
}

impl Coordinator {
    /// Create a coordinator recording into `registry`.
    pub fn new(registry: Arc<TaskRegistry>) -> Self {
        Self {
            registry,
            next_task_id: AtomicU64::new(0),
        }
    }

    /// The shared registry tasks record into.
    pub fn registry(&self) -> &Arc<TaskRegistry> {
        &self.registry
    }

    /// Reserve the next task id, starting at 1.
    ///
    /// The counter is shared across all operations and never reset, so
    /// ids stay unique across overlapping requests.
    pub fn next_task_id(&self) -> u64 {
        self.next_task_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Launch `count` tasks concurrently and wait for all of them.
    ///
    /// Results preserve launch order: `results[i]` belongs to the i-th
    /// launched task regardless of completion order. Every task is
    /// awaited even after a failure is observed, so none is left
    /// orphaned; the first failure seen is the one returned.
    pub async fn run_all(&self, count: usize, delay: Duration) -> Result<Vec<TaskResult>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        tracing::info!("fan-out of {count} task(s), {}ms each", delay.as_millis());
        let start = Instant::now();

        let tasks: Vec<_> = (0..count)
            .map(|_| runner::spawn(Arc::clone(&self.registry), self.next_task_id(), delay))
            .collect();

        let mut results = Vec::with_capacity(count);
        let mut first_failure = None;
        for task in tasks {
            match task.join().await {
                Ok(result) => results.push(result),
                Err(e) => {
                    tracing::error!("fan-out task failed: {e}");
                    if first_failure.is_none() {
                        first_failure = Some(e);
                    }
                }
            }
        }

        if let Some(e) = first_failure {
            return Err(e);
        }

        tracing::info!(
            "fan-out of {count} task(s) completed in {}ms",
            start.elapsed().as_millis()
        );
        Ok(results)
    }

    /// Launch `count` tasks that each append to a shared result list as
    /// they finish, then wait for every task.
    ///
    /// Unlike [`Coordinator::run_all`], results arrive in completion
    /// order, not launch order. With a uniform delay the order is
    /// effectively scheduler-determined.
    pub async fn run_unordered(&self, count: usize, delay: Duration) -> Result<Vec<TaskResult>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        tracing::info!(
            "unordered fan-out of {count} task(s), {}ms each",
            delay.as_millis()
        );

        let results = Arc::new(Mutex::new(Vec::with_capacity(count)));
        let mut handles = Vec::with_capacity(count);
        for _ in 0..count {
            let task_id = self.next_task_id();
            let registry = Arc::clone(&self.registry);
            let results = Arc::clone(&results);
            let handle = tokio::spawn(async move {
                let result = runner::run(&registry, task_id, delay).await;
                results.lock().unwrap().push(result);
            });
            handles.push((task_id, handle));
        }

        let mut first_failure = None;
        for (task_id, handle) in handles {
            if let Err(e) = handle.await {
                let err = Error::from_join(task_id, e);
                tracing::error!("unordered fan-out task failed: {err}");
                if first_failure.is_none() {
                    first_failure = Some(err);
                }
            }
        }

        if let Some(e) = first_failure {
            return Err(e);
        }

        let collected = std::mem::take(&mut *results.lock().unwrap());
        Ok(collected)
    }
}
