//! Alert sinks for launch notifications.
//!
//! An [`AlertSink`] receives human-readable messages about failed launch
//! attempts and attempts that run longer than their alert interval. Sinks are
//! fire-and-forget: they return nothing and their own delivery problems are
//! not reported back to the launcher.
//!
//! A sink may be called from the orchestrating task and from a per-attempt
//! ticker task, so every implementation must be `Send + Sync`.

use std::sync::Mutex;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, warn};

/// Destination for operational launch alerts.
///
/// Any `Fn(&str) + Send + Sync` closure is a sink:
///
/// ```
/// use std::sync::Arc;
/// use launchseq::{AlertSink, Launcher};
///
/// let launcher = Launcher::new();
/// let sink: Arc<dyn AlertSink> = Arc::new(|msg: &str| eprintln!("ALERT {msg}"));
/// launcher.set_alert_sink(sink);
/// ```
pub trait AlertSink: Send + Sync {
    /// Deliver one alert message.
    fn alert(&self, message: &str);
}

impl<F> AlertSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn alert(&self, message: &str) {
        self(message)
    }
}

/// Sink that writes every alert to the `tracing` pipeline at `error` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AlertSink for TracingSink {
    fn alert(&self, message: &str) {
        error!(target: "launchseq::alert", "{}", message);
    }
}

/// Sink that keeps every alert in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all alerts received so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AlertSink for MemorySink {
    fn alert(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

/// Sink that forwards alerts into an unbounded tokio channel.
///
/// Useful when another task (a chat notifier, a pager bridge) owns delivery.
/// Alerts sent after the receiver is dropped are discarded.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<String>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<String>) -> Self {
        Self { tx }
    }
}

impl AlertSink for ChannelSink {
    fn alert(&self, message: &str) {
        if self.tx.send(message.to_string()).is_err() {
            warn!("Alert receiver dropped, discarding: {}", message);
        }
    }
}
