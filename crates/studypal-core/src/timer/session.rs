//! Per-task counters of completed work phases.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Maps a task id to the number of work phases completed while that task
/// was bound to the timer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTracker {
    counts: BTreeMap<String, u64>,
}

/// Aggregate figures for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total_sessions: u64,
    pub tracked_tasks: usize,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit one completed work phase to `task_id`.
    pub fn record_completion(&mut self, task_id: &str) {
        *self.counts.entry(task_id.to_string()).or_insert(0) += 1;
    }

    /// Drop the counter for a task removed from the focus list.
    /// Returns the count that was removed.
    pub fn remove_task(&mut self, task_id: &str) -> Option<u64> {
        self.counts.remove(task_id)
    }

    pub fn sessions_for(&self, task_id: &str) -> u64 {
        self.counts.get(task_id).copied().unwrap_or(0)
    }

    pub fn total_sessions(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Minutes of focus represented by all sessions at the given work length.
    pub fn focused_minutes(&self, work_secs: u64) -> u64 {
        let total_secs = self.total_sessions().saturating_mul(work_secs);
        (total_secs + 30) / 60
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(id, n)| (id.as_str(), *n))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            total_sessions: self.total_sessions(),
            tracked_tasks: self.counts.len(),
        }
    }
}
