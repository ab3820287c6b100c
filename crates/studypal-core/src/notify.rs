//! Notification side channel.
//!
//! The engine calls a [`NotificationSink`] once per phase completion.
//! Delivery is best-effort: a failing sink is logged and otherwise ignored.

use std::error::Error;

/// Result returned by a sink. Errors never reach the engine's caller.
pub type NotifyResult = Result<(), Box<dyn Error + Send + Sync>>;

/// Receiver for phase-completion cues (sound, desktop notification, ...).
pub trait NotificationSink {
    /// Short identifier used in log lines.
    fn name(&self) -> &str {
        "sink"
    }

    /// Deliver one notification. Must not block for long or panic; the
    /// engine has already updated its state and informed listeners.
    fn notify(&self, title: &str, body: &str) -> NotifyResult;
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl NotificationSink for NoopSink {
    fn name(&self) -> &str {
        "noop"
    }

    fn notify(&self, _title: &str, _body: &str) -> NotifyResult {
        Ok(())
    }
}

/// Emits notifications as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    fn notify(&self, title: &str, body: &str) -> NotifyResult {
        tracing::info!(target: "studypal::notify", %title, %body, "notification");
        Ok(())
    }
}

/// Fans a notification out to several sinks; the first failure is reported
/// after every sink has been tried.
#[derive(Default)]
pub struct MultiSink {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl MultiSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl NotificationSink for MultiSink {
    fn name(&self) -> &str {
        "multi"
    }

    fn notify(&self, title: &str, body: &str) -> NotifyResult {
        let mut first_err = None;
        for sink in &self.sinks {
            if let Err(e) = sink.notify(title, body) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
