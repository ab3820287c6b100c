use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Phase, ProfileName, TimerState};

/// Every state change of the timer produces an Event.
/// Presentation layers subscribe to them instead of polling engine internals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u64,
        task_id: Option<String>,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStopped {
        /// Phase that was interrupted.
        phase: Phase,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// One second elapsed without finishing the phase.
    Tick {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    PhaseCompleted {
        completed: Phase,
        next: Phase,
        completed_cycles: u64,
        /// Task credited with the session, only set for finished work phases.
        credited_task: Option<String>,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    ProfileSelected {
        profile: ProfileName,
        work_secs: u64,
        at: DateTime<Utc>,
    },
    TaskSelected {
        task_id: String,
        at: DateTime<Utc>,
    },
    TaskRemoved {
        task_id: String,
        binding_cleared: bool,
        sessions_dropped: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        profile: ProfileName,
        state: TimerState,
        total_secs: u64,
        progress_pct: f64,
        task_id: Option<String>,
        task_sessions: u64,
        total_sessions: u64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Whether the event marks a phase boundary.
    pub fn is_completion(&self) -> bool {
        matches!(self, Event::PhaseCompleted { .. })
    }
}
