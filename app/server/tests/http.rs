//! End-to-end tests driving the HTTP surface of a live server.

use fanout_server::{ServeHandle, ServerConfig, serve};
use serde_json::Value;

/// Boot a server on an OS-assigned port and return its base URL.
async fn start() -> (ServeHandle, String) {
    let mut config = ServerConfig::default();
    config.server.port = 0;
    let handle = serve(&config).await.unwrap();
    let base = format!("http://127.0.0.1:{}", handle.port);
    (handle, base)
}

async fn get_json(url: &str) -> (reqwest::StatusCode, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status();
    let body = response.json::<Value>().await.unwrap();
    (status, body)
}

#[tokio::test]
async fn health_reports_ok() {
    let (handle, base) = start().await;

    let (status, body) = get_json(&format!("{base}/tasks/health")).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
    assert!(body["timestamp"].is_string());

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn sync_task_reports_elapsed() {
    let (handle, base) = start().await;

    let (status, body) = get_json(&format!("{base}/tasks/sync?delay=10")).await;
    assert_eq!(status, 200);
    assert!(body["elapsed_ms"].as_u64().unwrap() >= 10);
    let message = body["result"]["message"].as_str().unwrap();
    assert!(message.contains("completed after 10ms"));

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn async_task_matches_sync_shape() {
    let (handle, base) = start().await;

    let (status, body) = get_json(&format!("{base}/tasks/async?delay=10")).await;
    assert_eq!(status, 200);
    assert!(body["result"]["task_id"].as_u64().unwrap() >= 1);
    assert!(body["result"]["worker"].is_string());

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn parallel_returns_count_results() {
    let (handle, base) = start().await;

    let (status, body) = get_json(&format!("{base}/tasks/parallel?count=3&delay=10")).await;
    assert_eq!(status, 200);
    assert_eq!(body["total_tasks"], 3);
    assert_eq!(body["results"].as_array().unwrap().len(), 3);
    assert!(body["elapsed_ms"].as_u64().unwrap() >= 10);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn virtual_threads_returns_all_results() {
    let (handle, base) = start().await;

    let (status, body) = get_json(&format!("{base}/tasks/virtual-threads?count=4&delay=5")).await;
    assert_eq!(status, 200);
    assert_eq!(body["spawned_tasks"], 4);
    assert_eq!(body["results"].as_array().unwrap().len(), 4);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn threads_reflects_executed_work() {
    let (handle, base) = start().await;

    // Run some work first so the registry has entries.
    let (status, _) = get_json(&format!("{base}/tasks/parallel?count=2&delay=5")).await;
    assert_eq!(status, 200);

    let (status, body) = get_json(&format!("{base}/tasks/threads")).await;
    assert_eq!(status, 200);
    assert!(body["worker_count"].as_u64().unwrap() >= 1);
    assert!(body["current_worker"].is_string());
    assert!(body["workers"].is_object());

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn benchmark_reports_both_modes() {
    let (handle, base) = start().await;

    let (status, body) = get_json(&format!("{base}/tasks/benchmark?taskCount=3&delay=5")).await;
    assert_eq!(status, 200);
    assert_eq!(body["task_count"], 3);
    let sequential = body["sequential"]["elapsed_ms"].as_u64().unwrap();
    let concurrent = body["concurrent"]["elapsed_ms"].as_u64().unwrap();
    assert!(sequential >= 15);
    assert!(concurrent >= 5);
    assert!(concurrent <= sequential);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn negative_parameters_are_rejected() {
    let (handle, base) = start().await;

    let (status, body) = get_json(&format!("{base}/tasks/parallel?count=-1")).await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], 400);
    assert!(body["message"].as_str().unwrap().contains("count"));

    let (status, _) = get_json(&format!("{base}/tasks/sync?delay=-5")).await;
    assert_eq!(status, 400);

    let (status, _) = get_json(&format!("{base}/tasks/benchmark?taskCount=-2")).await;
    assert_eq!(status, 400);

    handle.shutdown().await.unwrap();
}
