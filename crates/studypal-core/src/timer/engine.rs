//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not own a clock
//! or spawn threads - the caller invokes `tick()` once per elapsed second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running <--pause/resume--> Paused
//!   ^                |                          |
//!   +------stop------+-----------stop-----------+
//! ```
//!
//! Within `Running` the phase cycles `WORK -> SHORT_BREAK | LONG_BREAK -> WORK`
//! on its own; a work phase never starts without a bound task.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(ModeCatalog::new(), ProfileName::Intermediate);
//! engine.select_task("T1");
//! engine.start()?;
//! // Once per second:
//! engine.tick(); // Some(Event::PhaseCompleted { .. }) at a phase boundary
//! ```

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::profile::{CustomProfileUpdate, ModeCatalog, ModeProfile, Phase, ProfileName};
use super::session::SessionTracker;
use crate::error::TimerError;
use crate::events::Event;
use crate::notify::{NoopSink, NotificationSink};

/// Observable timer state. Only the engine's transitions mutate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: Phase,
    pub remaining_secs: u64,
    pub running: bool,
    pub paused: bool,
    pub completed_cycles: u64,
}

impl TimerState {
    fn initial(profile: &ModeProfile) -> Self {
        Self {
            phase: Phase::Work,
            remaining_secs: profile.work_secs,
            running: false,
            paused: false,
            completed_cycles: 0,
        }
    }

    /// Coarse run state, used in error messages and logs.
    pub fn status(&self) -> &'static str {
        match (self.running, self.paused) {
            (false, _) => "idle",
            (true, false) => "running",
            (true, true) => "paused",
        }
    }
}

type Listener = Box<dyn FnMut(&Event)>;

/// Core timer engine.
///
/// Owns the timer state, the active task binding and the per-task session
/// counters for one user session.
pub struct TimerEngine {
    catalog: ModeCatalog,
    profile: ModeProfile,
    state: TimerState,
    bound_task: Option<String>,
    sessions: SessionTracker,
    sink: Box<dyn NotificationSink>,
    listeners: Vec<Listener>,
}

impl fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerEngine")
            .field("profile", &self.profile.name)
            .field("state", &self.state)
            .field("bound_task", &self.bound_task)
            .field("sessions", &self.sessions)
            .field("sink", &self.sink.name())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(ModeCatalog::new(), ProfileName::Intermediate)
    }
}

impl TimerEngine {
    /// Create an idle engine on the given profile.
    pub fn new(catalog: ModeCatalog, profile: ProfileName) -> Self {
        let profile = catalog.profile(profile);
        Self {
            state: TimerState::initial(&profile),
            catalog,
            profile,
            bound_task: None,
            sessions: SessionTracker::new(),
            sink: Box::new(NoopSink),
            listeners: Vec::new(),
        }
    }

    pub fn with_sink(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn set_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sink = sink;
    }

    /// Register a listener that receives every event the engine emits,
    /// in emission order.
    pub fn subscribe(&mut self, listener: impl FnMut(&Event) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.state.remaining_secs
    }

    pub fn completed_cycles(&self) -> u64 {
        self.state.completed_cycles
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    pub fn profile(&self) -> &ModeProfile {
        &self.profile
    }

    pub fn catalog(&self) -> &ModeCatalog {
        &self.catalog
    }

    pub fn bound_task(&self) -> Option<&str> {
        self.bound_task.as_deref()
    }

    pub fn sessions(&self) -> &SessionTracker {
        &self.sessions
    }

    /// Full length of the current phase.
    pub fn phase_duration_secs(&self) -> u64 {
        self.profile.duration_secs(self.state.phase)
    }

    /// 0.0 .. 100.0 progress within the current phase.
    pub fn progress_pct(&self) -> f64 {
        let total = self.phase_duration_secs();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.state.remaining_secs);
        elapsed as f64 / total as f64 * 100.0
    }

    /// Work phases completed since the last long break.
    pub fn cycle_progress(&self) -> u64 {
        let cadence = u64::from(self.profile.cycles_per_long_break.max(1));
        self.state.completed_cycles % cadence
    }

    /// Remaining time as `MM:SS`.
    pub fn formatted_remaining(&self) -> String {
        format_clock(self.state.remaining_secs)
    }

    /// Build a full state snapshot event. Not delivered to listeners.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            profile: self.profile.name,
            state: self.state,
            total_secs: self.phase_duration_secs(),
            progress_pct: self.progress_pct(),
            task_id: self.bound_task.clone(),
            task_sessions: self
                .bound_task
                .as_deref()
                .map(|id| self.sessions.sessions_for(id))
                .unwrap_or(0),
            total_sessions: self.sessions.total_sessions(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Result<Event, TimerError> {
        if self.state.running {
            return Err(self.invalid("start"));
        }
        if self.state.phase == Phase::Work && self.bound_task.is_none() {
            return Err(TimerError::NoTaskSelected);
        }
        self.state.running = true;
        self.state.paused = false;
        debug!(phase = %self.state.phase, remaining = self.state.remaining_secs, "timer started");
        Ok(self.emit(Event::TimerStarted {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_secs,
            task_id: self.bound_task.clone(),
            at: Utc::now(),
        }))
    }

    pub fn pause(&mut self) -> Result<Event, TimerError> {
        if !self.state.running || self.state.paused {
            return Err(self.invalid("pause"));
        }
        self.state.paused = true;
        debug!(remaining = self.state.remaining_secs, "timer paused");
        Ok(self.emit(Event::TimerPaused {
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        }))
    }

    pub fn resume(&mut self) -> Result<Event, TimerError> {
        if !self.state.running || !self.state.paused {
            return Err(self.invalid("resume"));
        }
        self.state.paused = false;
        debug!(remaining = self.state.remaining_secs, "timer resumed");
        Ok(self.emit(Event::TimerResumed {
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        }))
    }

    /// Abandon the current phase. The cycle count survives; the engine
    /// returns to an idle work phase.
    pub fn stop(&mut self) -> Result<Event, TimerError> {
        if !self.state.running {
            return Err(self.invalid("stop"));
        }
        let interrupted = self.state.phase;
        self.state.running = false;
        self.state.paused = false;
        self.state.phase = Phase::Work;
        self.state.remaining_secs = self.profile.work_secs;
        debug!(phase = %interrupted, "timer stopped");
        Ok(self.emit(Event::TimerStopped {
            phase: interrupted,
            at: Utc::now(),
        }))
    }

    /// Return to the initial state. Allowed from any state; session
    /// counters and the task binding are kept.
    pub fn reset(&mut self) -> Event {
        self.state = TimerState::initial(&self.profile);
        debug!("timer reset");
        self.emit(Event::TimerReset { at: Utc::now() })
    }

    /// Advance by exactly one second.
    ///
    /// Returns `None` while idle or paused. Otherwise returns `Event::Tick`,
    /// or `Event::PhaseCompleted` when this second finished the phase.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.state.running || self.state.paused {
            return None;
        }
        self.state.remaining_secs = self.state.remaining_secs.saturating_sub(1);
        if self.state.remaining_secs == 0 {
            return Some(self.complete_phase());
        }
        Some(self.emit(Event::Tick {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        }))
    }

    /// Switch to another catalog profile. Only allowed while idle.
    pub fn select_profile(&mut self, name: ProfileName) -> Result<Event, TimerError> {
        if self.state.running {
            return Err(self.invalid("switch profile"));
        }
        self.profile = self.catalog.profile(name);
        self.state = TimerState::initial(&self.profile);
        info!(profile = %name, work_secs = self.profile.work_secs, "profile selected");
        Ok(self.emit(Event::ProfileSelected {
            profile: name,
            work_secs: self.profile.work_secs,
            at: Utc::now(),
        }))
    }

    /// Edit the custom profile.
    ///
    /// When CUSTOM is the active profile the edit counts as a profile switch:
    /// it is refused while running and re-initialises the idle timer.
    pub fn set_custom_profile(
        &mut self,
        update: &CustomProfileUpdate,
    ) -> Result<ModeProfile, TimerError> {
        let active = self.profile.name == ProfileName::Custom;
        if active && self.state.running {
            return Err(self.invalid("edit the active profile"));
        }
        let merged = self.catalog.set_custom_profile(update)?;
        if active {
            self.profile = merged.clone();
            self.state = TimerState::initial(&self.profile);
            self.emit(Event::ProfileSelected {
                profile: ProfileName::Custom,
                work_secs: self.profile.work_secs,
                at: Utc::now(),
            });
        }
        Ok(merged)
    }

    // ── Task binding ─────────────────────────────────────────────────

    /// Bind `task_id` for session credit. Never interrupts the timer.
    pub fn select_task(&mut self, task_id: impl Into<String>) -> Event {
        let task_id = task_id.into();
        debug!(task = %task_id, "task selected");
        self.bound_task = Some(task_id.clone());
        self.emit(Event::TaskSelected {
            task_id,
            at: Utc::now(),
        })
    }

    /// Clear the binding if it points at `task_id`. Returns whether it did.
    pub fn clear_task_if_removed(&mut self, task_id: &str) -> bool {
        if self.bound_task.as_deref() == Some(task_id) {
            self.bound_task = None;
            true
        } else {
            false
        }
    }

    /// Handle removal of a task from the day's focus list: drops the binding
    /// and the task's session counter.
    pub fn on_task_removed(&mut self, task_id: &str) -> Event {
        let binding_cleared = self.clear_task_if_removed(task_id);
        let sessions_dropped = self.sessions.remove_task(task_id).unwrap_or(0);
        debug!(task = %task_id, binding_cleared, sessions_dropped, "task removed");
        self.emit(Event::TaskRemoved {
            task_id: task_id.to_string(),
            binding_cleared,
            sessions_dropped,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_phase(&mut self) -> Event {
        let completed = self.state.phase;
        let mut credited_task = None;

        if completed == Phase::Work {
            self.state.completed_cycles += 1;
            if let Some(task) = &self.bound_task {
                self.sessions.record_completion(task);
                credited_task = Some(task.clone());
            }
        }

        let next = match completed {
            Phase::Work => self.profile.break_after(self.state.completed_cycles),
            Phase::ShortBreak | Phase::LongBreak => Phase::Work,
        };
        self.state.phase = next;
        self.state.remaining_secs = self.profile.duration_secs(next);

        info!(
            completed = %completed,
            next = %next,
            cycles = self.state.completed_cycles,
            task = credited_task.as_deref().unwrap_or("-"),
            "phase completed"
        );

        let event = self.emit(Event::PhaseCompleted {
            completed,
            next,
            completed_cycles: self.state.completed_cycles,
            credited_task,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        });

        // Listeners have the event before the sink runs.
        let title = format!("{} Complete!", completed.label());
        if let Err(e) = self.sink.notify(&title, completion_message(next)) {
            warn!(sink = self.sink.name(), error = %e, "notification failed");
        }
        event
    }

    fn emit(&mut self, event: Event) -> Event {
        for listener in &mut self.listeners {
            listener(&event);
        }
        event
    }

    fn invalid(&self, action: &'static str) -> TimerError {
        TimerError::InvalidTransition {
            action,
            state: self.state.status(),
        }
    }
}

/// Next-action message shown when a phase ends.
pub fn completion_message(next: Phase) -> &'static str {
    match next {
        Phase::LongBreak => "Time for a long break!",
        Phase::ShortBreak => "Time for a short break!",
        Phase::Work => "Back to work! Stay focused!",
    }
}

/// Format seconds as zero-padded `MM:SS`; minutes are not wrapped at 60.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
