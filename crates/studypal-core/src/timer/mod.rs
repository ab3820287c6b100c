mod engine;
mod profile;
mod session;

pub use engine::{completion_message, format_clock, TimerEngine, TimerState};
pub use profile::{CustomProfileUpdate, ModeCatalog, ModeProfile, Phase, ProfileName};
pub use session::{SessionSummary, SessionTracker};
