//! # StudyPal Core Library
//!
//! This library provides the focus-timer logic behind StudyPal. The CLI
//! binary and any GUI shell are thin layers over the same engine.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven state machine alternating work and
//!   break phases; the caller owns the one-second clock
//! - **Mode Catalog**: fixed BEGINNER/INTERMEDIATE/PRO profiles plus an
//!   editable CUSTOM profile
//! - **Session Tracking**: completed work phases credited to the bound task
//! - **Notifications**: best-effort sink invoked on every phase completion
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`ModeCatalog`]: Profile lookup and custom profile validation
//! - [`SessionTracker`]: Per-task session counters
//! - [`NotificationSink`]: Trait for completion cues
//! - [`TaskSource`]: Trait for the external task service

pub mod error;
pub mod events;
pub mod notify;
pub mod storage;
pub mod task;
pub mod timer;

pub use error::{ConfigError, CoreError, TaskSourceError, TimerError};
pub use events::Event;
pub use notify::{LogSink, MultiSink, NoopSink, NotificationSink, NotifyResult};
pub use storage::Config;
pub use task::{FocusList, JsonFileTaskSource, StaticTaskSource, TaskSource, TaskSummary};
pub use timer::{
    CustomProfileUpdate, ModeCatalog, ModeProfile, Phase, ProfileName, SessionTracker,
    TimerEngine, TimerState,
};
