//! Task runner behavior for the inline and detached variants, the
//! composite task, and cancellation.

use fanout_core::{Error, TaskRegistry, run, run_composite, spawn};
use std::{sync::Arc, time::Duration};
use tokio::time::Instant;

/// The inline variant suspends the caller for the full delay and
/// records its worker before sleeping.
#[tokio::test(start_paused = true)]
async fn run_waits_out_the_delay() {
    let registry = TaskRegistry::new();
    let start = Instant::now();
    let result = run(&registry, 1, Duration::from_millis(100)).await;

    assert!(start.elapsed() >= Duration::from_millis(100));
    assert_eq!(result.task_id, 1);
    assert_eq!(registry.len(), 1);
    let snapshot = registry.snapshot();
    assert_eq!(snapshot[&result.worker], "task-1 (100ms)");
}

/// The detached variant produces the same result shape as the inline
/// one.
#[tokio::test(start_paused = true)]
async fn spawn_matches_inline_output() {
    let registry = Arc::new(TaskRegistry::new());

    let inline = run(&registry, 1, Duration::from_millis(10)).await;
    let detached = spawn(Arc::clone(&registry), 2, Duration::from_millis(10))
        .join()
        .await
        .unwrap();

    assert_eq!(inline.message, "task 1 completed after 10ms on ".to_string() + inline.worker.as_str());
    assert_eq!(detached.message, "task 2 completed after 10ms on ".to_string() + detached.worker.as_str());
}

/// Aborting a spawned task surfaces a cancellation error, never a
/// fabricated result.
#[tokio::test]
async fn aborted_task_reports_cancellation() {
    let registry = Arc::new(TaskRegistry::new());
    let task = spawn(Arc::clone(&registry), 7, Duration::from_secs(30));

    task.abort();
    let err = task.join().await.unwrap_err();
    assert_eq!(err, Error::Cancelled { task_id: 7 });
}

/// Composite stages run in a fixed sequence and the total time is the
/// sum of the three stage delays.
#[tokio::test(start_paused = true)]
async fn composite_runs_stages_in_sequence() {
    let start = Instant::now();
    let message = run_composite(1).await;
    let elapsed = start.elapsed();

    assert_eq!(message, "task 1 finished: db-query-ok | remote-call-ok | file-op-ok");
    assert!(elapsed >= Duration::from_millis(3_500));
    assert!(elapsed < Duration::from_millis(4_000));
}

/// A composite task does not block siblings: a task spawned alongside
/// it finishes on its own schedule.
#[tokio::test(start_paused = true)]
async fn composite_does_not_block_siblings() {
    let registry = Arc::new(TaskRegistry::new());

    let composite = tokio::spawn(run_composite(1));
    let sibling = spawn(Arc::clone(&registry), 2, Duration::from_millis(50));

    let start = Instant::now();
    let sibling_result = sibling.join().await.unwrap();
    assert_eq!(sibling_result.task_id, 2);
    // The sibling finished after its own 50ms, not after the
    // composite's 3.5s.
    assert!(start.elapsed() < Duration::from_millis(3_500));

    composite.await.unwrap();
}
