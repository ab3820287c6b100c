//! Timer commands.
//!
//! `run` drives one engine with a real one-second clock until the requested
//! number of work cycles is done or Ctrl-C is pressed. `simulate` applies a
//! fixed number of ticks without waiting, which is handy for scripting.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Subcommand;
use studypal_core::timer::{format_clock, TimerEngine};
use studypal_core::{
    Config, Event, FocusList, JsonFileTaskSource, LogSink, MultiSink, NoopSink, NotificationSink,
    NotifyResult, Phase,
};
use tokio::time::MissedTickBehavior;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the timer in the foreground
    Run {
        /// Task credited with completed work phases
        #[arg(long)]
        task: String,
        /// Profile to use (defaults to timer.default_profile)
        #[arg(long)]
        profile: Option<String>,
        /// Stop after this many completed work phases
        #[arg(long)]
        cycles: Option<u64>,
        /// Task export; when given, --task must be on today's focus list
        #[arg(long)]
        tasks: Option<PathBuf>,
        /// User whose tasks are loaded from --tasks
        #[arg(long, default_value = "local")]
        user: String,
        /// Milliseconds per simulated second
        #[arg(long, default_value = "1000")]
        tick_ms: u64,
        /// Print every event as a JSON line
        #[arg(long)]
        json: bool,
    },
    /// Apply a number of ticks instantly and print the resulting state as JSON
    Simulate {
        /// Task credited with completed work phases
        #[arg(long)]
        task: Option<String>,
        /// Profile to use (defaults to timer.default_profile)
        #[arg(long)]
        profile: Option<String>,
        /// Number of one-second ticks to apply
        #[arg(long, default_value = "0")]
        ticks: u64,
        /// Print phase completions before the final snapshot
        #[arg(long)]
        events: bool,
    },
}

/// Bell and message on stderr.
struct TerminalSink {
    bell: bool,
}

impl NotificationSink for TerminalSink {
    fn name(&self) -> &str {
        "terminal"
    }

    fn notify(&self, title: &str, body: &str) -> NotifyResult {
        let mut err = std::io::stderr().lock();
        if self.bell {
            write!(err, "\x07")?;
        }
        writeln!(err, "\n{title} {body}")?;
        Ok(())
    }
}

fn sink_for(config: &Config) -> Box<dyn NotificationSink> {
    if config.notifications.enabled {
        Box::new(
            MultiSink::new()
                .with(TerminalSink {
                    bell: config.notifications.bell,
                })
                .with(LogSink),
        )
    } else {
        Box::new(NoopSink)
    }
}

fn render(event: &Event, json: bool) {
    if json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!(error = %e, "failed to encode event"),
        }
        return;
    }
    match event {
        Event::Tick {
            phase,
            remaining_secs,
            ..
        } => {
            print!("\r{:<12} {}", phase.label(), format_clock(*remaining_secs));
            let _ = std::io::stdout().flush();
        }
        Event::TimerStarted {
            phase,
            remaining_secs,
            task_id,
            ..
        } => {
            println!(
                "{} started ({}) for task {}",
                phase.label(),
                format_clock(*remaining_secs),
                task_id.as_deref().unwrap_or("-")
            );
        }
        Event::PhaseCompleted {
            next,
            completed_cycles,
            remaining_secs,
            ..
        } => {
            println!(
                "\rcycles completed: {completed_cycles}, next: {} ({})",
                next.label(),
                format_clock(*remaining_secs)
            );
        }
        Event::TimerStopped { .. } => println!("\ntimer stopped"),
        _ => {}
    }
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    match action {
        TimerAction::Run {
            task,
            profile,
            cycles,
            tasks,
            user,
            tick_ms,
            json,
        } => {
            if tick_ms == 0 {
                return Err("--tick-ms must be positive".into());
            }
            if cycles == Some(0) {
                return Err("--cycles must be positive".into());
            }
            if let Some(path) = tasks {
                let list = FocusList::load(&JsonFileTaskSource::new(path), &user)?;
                if !list.contains(&task) {
                    return Err(format!("task '{task}' is not on today's focus list").into());
                }
            }

            let mut engine = config.build_engine(profile.as_deref())?;
            engine.set_sink(sink_for(&config));
            engine.subscribe(move |event| render(event, json));
            engine.select_task(task);

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(drive(&mut engine, cycles, Duration::from_millis(tick_ms)))?;

            let summary = engine.sessions().summary();
            eprintln!(
                "{} session(s), {} minute(s) focused",
                summary.total_sessions,
                engine.sessions().focused_minutes(engine.profile().work_secs)
            );
            Ok(())
        }
        TimerAction::Simulate {
            task,
            profile,
            ticks,
            events,
        } => {
            let mut engine = config.build_engine(profile.as_deref())?;
            if let Some(task) = task {
                engine.select_task(task);
            }
            engine.start()?;
            for _ in 0..ticks {
                if let Some(event) = engine.tick() {
                    if events && event.is_completion() {
                        println!("{}", serde_json::to_string(&event)?);
                    }
                }
            }
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            Ok(())
        }
    }
}

/// Tick once per `period` until `cycles` work phases are done or Ctrl-C.
async fn drive(
    engine: &mut TimerEngine,
    cycles: Option<u64>,
    period: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    interval.tick().await;

    engine.start()?;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let Some(Event::PhaseCompleted { completed: Phase::Work, completed_cycles, .. }) =
                    engine.tick()
                else {
                    continue;
                };
                if cycles.is_some_and(|target| completed_cycles >= target) {
                    engine.stop()?;
                    break;
                }
            }
            _ = &mut ctrl_c => {
                tracing::debug!("interrupted");
                engine.stop()?;
                break;
            }
        }
    }
    Ok(())
}
