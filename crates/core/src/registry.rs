//! Active-task registry.
//!
//! Tracks, per worker, a label for the task it most recently executed.
//! Entries are overwritten in place and never removed, so the map grows
//! with the number of distinct workers observed over the process
//! lifetime.

use compact_str::CompactString;
use std::{collections::BTreeMap, sync::Mutex};

/// Concurrency-safe map from worker identity to the label of the task
/// that worker last executed. Last write wins.
pub struct TaskRegistry {
    entries: Mutex<BTreeMap<CompactString, String>>,
}

impl TaskRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// Record that `worker` is executing the task described by `label`.
    ///
    /// An existing entry for the same worker is overwritten.
    pub fn record(&self, worker: CompactString, label: String) {
        self.entries.lock().unwrap().insert(worker, label);
    }

    /// Snapshot of all entries (cloned).
    pub fn snapshot(&self) -> BTreeMap<CompactString, String> {
        self.entries.lock().unwrap().clone()
    }

    /// Number of workers that have recorded a task so far.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Check whether no worker has recorded a task yet.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}
