//! Shared application state for the task server.

use fanout_core::{Coordinator, TaskRegistry};
use std::sync::Arc;

/// Shared state available to all request handlers.
pub struct AppState {
    /// Fan-out coordinator (owns the process-wide task id counter).
    pub fanout: Arc<Coordinator>,
    /// Registry of what each worker last executed.
    pub registry: Arc<TaskRegistry>,
}

impl AppState {
    /// Wire a fresh coordinator onto a fresh shared registry.
    pub fn new() -> Self {
        let registry = Arc::new(TaskRegistry::new());
        let fanout = Arc::new(Coordinator::new(Arc::clone(&registry)));
        Self { fanout, registry }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            fanout: Arc::clone(&self.fanout),
            registry: Arc::clone(&self.registry),
        }
    }
}
