//! HTTP routes for the `/tasks` demo endpoints.
//!
//! Each handler validates its query parameters, drives one core
//! operation, and reports results together with wall-clock timing.

use crate::{error::ApiError, state::AppState};
use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use compact_str::CompactString;
use fanout_core::{BenchmarkReport, TaskResult, non_negative};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc, time::Duration};
use tokio::time::Instant;

/// Build the axum router with all `/tasks` endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/tasks/sync", get(sync_task))
        .route("/tasks/async", get(async_task))
        .route("/tasks/parallel", get(parallel_tasks))
        .route("/tasks/virtual-threads", get(unordered_tasks))
        .route("/tasks/complex", get(complex_task))
        .route("/tasks/threads", get(active_workers))
        .route("/tasks/benchmark", get(benchmark))
        .route("/tasks/health", get(health))
        .with_state(state)
}

fn default_delay() -> i64 {
    100
}

fn default_count() -> i64 {
    10
}

fn default_unordered_count() -> i64 {
    20
}

fn default_unordered_delay() -> i64 {
    50
}

fn default_task_id() -> i64 {
    1
}

fn default_task_count() -> i64 {
    50
}

#[derive(Debug, Deserialize)]
struct DelayQuery {
    #[serde(default = "default_delay")]
    delay: i64,
}

#[derive(Debug, Deserialize)]
struct FanOutQuery {
    #[serde(default = "default_count")]
    count: i64,
    #[serde(default = "default_delay")]
    delay: i64,
}

#[derive(Debug, Deserialize)]
struct UnorderedQuery {
    #[serde(default = "default_unordered_count")]
    count: i64,
    #[serde(default = "default_unordered_delay")]
    delay: i64,
}

#[derive(Debug, Deserialize)]
struct ComplexQuery {
    #[serde(rename = "taskId", default = "default_task_id")]
    task_id: i64,
}

#[derive(Debug, Deserialize)]
struct BenchmarkQuery {
    #[serde(rename = "taskCount", default = "default_task_count")]
    task_count: i64,
    #[serde(default = "default_delay")]
    delay: i64,
}

/// One task's result with the request's wall time.
#[derive(Debug, Serialize)]
struct SingleResponse {
    elapsed_ms: u64,
    result: TaskResult,
}

/// A launch-ordered fan-out with its efficiency figure.
#[derive(Debug, Serialize)]
struct ParallelResponse {
    total_tasks: usize,
    delay_ms: u64,
    elapsed_ms: u64,
    /// Ideal serialized time over actual time, as a percentage. The
    /// closer the fan-out is to perfectly concurrent, the closer this
    /// gets to `count × 100`.
    efficiency_percent: Option<f64>,
    results: Vec<TaskResult>,
}

/// A completion-ordered fan-out.
#[derive(Debug, Serialize)]
struct UnorderedResponse {
    spawned_tasks: usize,
    delay_ms: u64,
    elapsed_ms: u64,
    results: Vec<TaskResult>,
}

#[derive(Debug, Serialize)]
struct ComplexResponse {
    task_id: u64,
    elapsed_ms: u64,
    message: String,
}

/// Registry snapshot plus the identity serving this request.
#[derive(Debug, Serialize)]
struct WorkersResponse {
    worker_count: usize,
    current_worker: CompactString,
    workers: BTreeMap<CompactString, String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: String,
}

/// Handles `GET /tasks/sync`: run one task inline on the request handler.
async fn sync_task(
    State(state): State<AppState>,
    Query(query): Query<DelayQuery>,
) -> Result<Json<SingleResponse>, ApiError> {
    let delay = Duration::from_millis(non_negative("delay", query.delay)?);

    let start = Instant::now();
    let result = fanout_core::run(&state.registry, state.fanout.next_task_id(), delay).await;

    Ok(Json(SingleResponse {
        elapsed_ms: start.elapsed().as_millis() as u64,
        result,
    }))
}

/// Handles `GET /tasks/async`: detach one task onto its own runtime task and
/// wait for it.
async fn async_task(
    State(state): State<AppState>,
    Query(query): Query<DelayQuery>,
) -> Result<Json<SingleResponse>, ApiError> {
    let delay = Duration::from_millis(non_negative("delay", query.delay)?);

    let start = Instant::now();
    let task = fanout_core::spawn(
        Arc::clone(&state.registry),
        state.fanout.next_task_id(),
        delay,
    );
    let result = task.join().await?;

    Ok(Json(SingleResponse {
        elapsed_ms: start.elapsed().as_millis() as u64,
        result,
    }))
}

/// Handles `GET /tasks/parallel`: launch-ordered fan-out of `count` tasks.
async fn parallel_tasks(
    State(state): State<AppState>,
    Query(query): Query<FanOutQuery>,
) -> Result<Json<ParallelResponse>, ApiError> {
    let count = non_negative("count", query.count)? as usize;
    let delay = Duration::from_millis(non_negative("delay", query.delay)?);

    let start = Instant::now();
    let results = state.fanout.run_all(count, delay).await?;
    let elapsed = start.elapsed();

    let ideal = delay.as_secs_f64() * count as f64;
    let efficiency_percent =
        (elapsed.as_secs_f64() > 0.0).then(|| ideal / elapsed.as_secs_f64() * 100.0);

    Ok(Json(ParallelResponse {
        total_tasks: count,
        delay_ms: delay.as_millis() as u64,
        elapsed_ms: elapsed.as_millis() as u64,
        efficiency_percent,
        results,
    }))
}

/// Handles `GET /tasks/virtual-threads`: completion-ordered fan-out that
/// manages its own set of tasks. Path kept for wire compatibility.
async fn unordered_tasks(
    State(state): State<AppState>,
    Query(query): Query<UnorderedQuery>,
) -> Result<Json<UnorderedResponse>, ApiError> {
    let count = non_negative("count", query.count)? as usize;
    let delay = Duration::from_millis(non_negative("delay", query.delay)?);

    let start = Instant::now();
    let results = state.fanout.run_unordered(count, delay).await?;

    Ok(Json(UnorderedResponse {
        spawned_tasks: count,
        delay_ms: delay.as_millis() as u64,
        elapsed_ms: start.elapsed().as_millis() as u64,
        results,
    }))
}

/// Handles `GET /tasks/complex`: three sequential simulated stages on one
/// task.
async fn complex_task(
    Query(query): Query<ComplexQuery>,
) -> Result<Json<ComplexResponse>, ApiError> {
    let task_id = non_negative("taskId", query.task_id)?;

    let start = Instant::now();
    let message = fanout_core::run_composite(task_id).await;

    Ok(Json(ComplexResponse {
        task_id,
        elapsed_ms: start.elapsed().as_millis() as u64,
        message,
    }))
}

/// Handles `GET /tasks/threads`: registry snapshot plus the worker serving
/// this request.
async fn active_workers(State(state): State<AppState>) -> Json<WorkersResponse> {
    let workers = state.registry.snapshot();

    Json(WorkersResponse {
        worker_count: workers.len(),
        current_worker: fanout_core::worker_identity(),
        workers,
    })
}

/// Handles `GET /tasks/benchmark`: sequential vs concurrent comparison.
async fn benchmark(
    State(state): State<AppState>,
    Query(query): Query<BenchmarkQuery>,
) -> Result<Json<BenchmarkReport>, ApiError> {
    let task_count = non_negative("taskCount", query.task_count)? as usize;
    let delay = Duration::from_millis(non_negative("delay", query.delay)?);

    let report = fanout_core::compare(&state.fanout, task_count, delay).await?;
    Ok(Json(report))
}

/// Handles `GET /tasks/health`: liveness probe.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
