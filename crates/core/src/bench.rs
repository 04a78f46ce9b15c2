//! Sequential-vs-concurrent benchmark over the same simulated workload.

use crate::{error::Result, fanout::Coordinator, runner};
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

/// Timing for one benchmark mode.
#[derive(Debug, Clone, Serialize)]
pub struct ModeReport {
    /// Total wall time in milliseconds.
    pub elapsed_ms: u64,
    /// Tasks completed per second. `null` when the elapsed time was too
    /// small to measure.
    pub throughput: Option<f64>,
}

/// Sequential and concurrent timings for the same workload, with the
/// derived improvement ratios.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    /// Number of tasks run in each mode.
    pub task_count: usize,
    /// Per-task delay in milliseconds.
    pub delay_ms: u64,
    /// Tasks run back-to-back, each finishing before the next starts.
    pub sequential: ModeReport,
    /// The same tasks as one fan-out.
    pub concurrent: ModeReport,
    /// Percentage of sequential time saved by running concurrently.
    pub time_reduction_percent: Option<f64>,
    /// How many times faster the concurrent run finished.
    pub speedup: Option<f64>,
}

/// Tasks per second, or `None` for an unmeasurably small duration.
pub fn throughput(tasks: usize, elapsed: Duration) -> Option<f64> {
    let seconds = elapsed.as_secs_f64();
    (seconds > 0.0).then(|| tasks as f64 / seconds)
}

/// Run `task_count` tasks strictly sequentially, then as one fan-out,
/// and compare the two timings.
///
/// A failure during either phase aborts the whole benchmark; partial
/// timings would not mean anything.
pub async fn compare(
    fanout: &Coordinator,
    task_count: usize,
    delay: Duration,
) -> Result<BenchmarkReport> {
    tracing::info!(
        "benchmark: {task_count} task(s), {}ms each",
        delay.as_millis()
    );

    let sequential_start = Instant::now();
    for _ in 0..task_count {
        runner::run(fanout.registry(), fanout.next_task_id(), delay).await;
    }
    let sequential_elapsed = sequential_start.elapsed();

    let concurrent_start = Instant::now();
    fanout.run_all(task_count, delay).await?;
    let concurrent_elapsed = concurrent_start.elapsed();

    let sequential_secs = sequential_elapsed.as_secs_f64();
    let concurrent_secs = concurrent_elapsed.as_secs_f64();
    let time_reduction_percent =
        (sequential_secs > 0.0).then(|| (sequential_secs - concurrent_secs) / sequential_secs * 100.0);
    let speedup = (concurrent_secs > 0.0).then(|| sequential_secs / concurrent_secs);

    tracing::info!(
        "benchmark done: sequential {}ms, concurrent {}ms",
        sequential_elapsed.as_millis(),
        concurrent_elapsed.as_millis()
    );

    Ok(BenchmarkReport {
        task_count,
        delay_ms: delay.as_millis() as u64,
        sequential: ModeReport {
            elapsed_ms: sequential_elapsed.as_millis() as u64,
            throughput: throughput(task_count, sequential_elapsed),
        },
        concurrent: ModeReport {
            elapsed_ms: concurrent_elapsed.as_millis() as u64,
            throughput: throughput(task_count, concurrent_elapsed),
        },
        time_reduction_percent,
        speedup,
    })
}
