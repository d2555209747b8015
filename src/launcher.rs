//! Launch orchestrator: ordered, endlessly retried dependency startup.
//!
//! [`Launcher`] holds an ordered list of [`LaunchUnit`]s and launches them one
//! at a time. Each unit is retried until it succeeds; the next unit never
//! starts before the previous one reported success.
//!
//! While an attempt is in flight a ticker emits
//! `"launch {name}: timeout: iterate {i}"` every alert interval. The attempt
//! itself is never cancelled: a timeout is a notification, not an abort.
//!
//! # Blocking forever
//!
//! There is no retry limit and no give-up signal. A dependency that never
//! comes up keeps [`Launcher::launch`] pending forever; the only evidence is
//! the alert stream (and `warn` logs). Callers that need a deadline wrap the
//! call in `tokio::time::timeout` themselves.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use launchseq::{Launcher, TracingSink};
//!
//! # async fn run() {
//! let mut launcher = Launcher::new();
//! launcher.add_fn("postgres", || async { Ok(()) });
//! launcher.add_fn("rabbitmq", || async { Ok(()) });
//! launcher.set_alert_sink(Arc::new(TracingSink));
//! launcher.launch().await;
//! # }
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use crate::alert::AlertSink;
use crate::config::UnitConfig;
use crate::error::{LaunchError, Result};
use crate::unit::{self, normalize_interval, BlockingFnUnit, FnUnit, LaunchUnit};

/// Sequences launch units with endless retry and stall alerts.
#[derive(Default)]
pub struct Launcher {
    units: Vec<Arc<dyn LaunchUnit>>,
    alert_sink: OnceCell<Arc<dyn AlertSink>>,
}

impl std::fmt::Debug for Launcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Launcher")
            .field("units", &self.unit_names())
            .field("has_alert_sink", &self.has_alert_sink())
            .finish()
    }
}

impl Launcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a launcher from config unit entries, in file order.
    pub fn from_config(units: &[UnitConfig]) -> Self {
        let mut launcher = Self::new();
        for cfg in units {
            launcher.add_unit(unit::from_config(cfg));
        }
        launcher
    }

    /// Append a unit. Launch order is insertion order; duplicates are allowed.
    pub fn add_unit(&mut self, unit: Arc<dyn LaunchUnit>) {
        self.units.push(unit);
    }

    /// Append an async closure as a unit with the default alert interval.
    pub fn add_fn<F, Fut>(&mut self, name: impl Into<String>, action: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.add_unit(Arc::new(FnUnit::new(name, action)));
    }

    /// Append a synchronous closure as a unit with the default alert interval.
    pub fn add_blocking_fn<F>(&mut self, name: impl Into<String>, action: F)
    where
        F: Fn() -> Result<()> + Send + Sync + 'static,
    {
        self.add_unit(Arc::new(BlockingFnUnit::new(name, action)));
    }

    /// Set the alert sink. Only the first call has an effect.
    pub fn set_alert_sink(&self, sink: Arc<dyn AlertSink>) {
        if self.alert_sink.set(sink).is_err() {
            debug!("Alert sink already set, ignoring replacement");
        }
    }

    pub fn has_alert_sink(&self) -> bool {
        self.alert_sink.get().is_some()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Unit names in launch order.
    pub fn unit_names(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.name()).collect()
    }

    /// Launch every unit in order, retrying each until it succeeds.
    ///
    /// Resolves only once all units are up. Failures never reach the caller;
    /// they are reported to the alert sink and retried after the unit's alert
    /// interval. See the module docs on unbounded blocking.
    pub async fn launch(&self) {
        crate::log_component!(info, "launcher", "Launching dependencies", units = self.units.len());
        for unit in &self.units {
            self.launch_unit(unit).await;
        }
        crate::log_component!(info, "launcher", "All dependencies launched");
    }

    async fn launch_unit(&self, unit: &Arc<dyn LaunchUnit>) {
        let name = unit.name();
        let interval = normalize_interval(unit.alert_interval());
        let mut attempt: u64 = 1;
        loop {
            match self.attempt(unit, interval).await {
                Ok(()) => {
                    crate::log_component!(
                        info,
                        "launcher",
                        "Dependency launched",
                        unit = name,
                        attempts = attempt,
                    );
                    return;
                }
                Err(e) => {
                    crate::log_component!(
                        warn,
                        "launcher",
                        "Launch attempt failed",
                        unit = name,
                        attempt = attempt,
                        retry_in = tracing::field::debug(interval),
                        error = tracing::field::display(&e),
                    );
                    self.alert(&format!("launch {}: {}", name, e));
                    tokio::time::sleep(interval).await;
                    attempt += 1;
                }
            }
        }
    }

    /// One attempt: run the action on its own task while a ticker reports
    /// every interval it is still running.
    async fn attempt(&self, unit: &Arc<dyn LaunchUnit>, interval: Duration) -> Result<()> {
        let worker = {
            let unit = Arc::clone(unit);
            tokio::spawn(async move { unit.launch().await })
        };
        let alerter = TimeoutAlerter::start(
            unit.name().to_string(),
            interval,
            self.alert_sink.get().cloned(),
        );

        let outcome = worker.await;
        alerter.stop().await;
        match outcome {
            Ok(result) => result,
            Err(e) => Err(LaunchError::from_join(e)),
        }
    }

    fn alert(&self, message: &str) {
        if let Some(sink) = self.alert_sink.get() {
            sink.alert(message);
        }
    }
}

/// Periodic "still running" alerts for one attempt.
///
/// [`TimeoutAlerter::stop`] waits until the ticker task has exited, so no
/// tick of this attempt can be delivered after it returns. Dropping the
/// alerter without calling `stop` aborts the task.
struct TimeoutAlerter {
    stop: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TimeoutAlerter {
    fn start(name: String, interval: Duration, sink: Option<Arc<dyn AlertSink>>) -> Self {
        let Some(first_tick) = Instant::now().checked_add(interval) else {
            debug!(unit = %name, ?interval, "Alert interval out of range, no stall alerts");
            return Self {
                stop: None,
                handle: None,
            };
        };

        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(first_tick, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut iteration: u64 = 1;
            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {}
                }
                debug!(unit = %name, iteration, "Launch still running");
                if let Some(sink) = &sink {
                    sink.alert(&format!("launch {}: timeout: iterate {}", name, iteration));
                }
                iteration += 1;
            }
        });
        Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Stop the ticker and wait for it to exit. A tick already being
    /// delivered finishes first.
    async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                crate::log_component!(
                    warn,
                    "launcher",
                    "Stall alert ticker failed",
                    error = tracing::field::display(LaunchError::from_join(e)),
                );
            }
        }
    }
}

impl Drop for TimeoutAlerter {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

/// Launch a single async action with retry and alerting.
///
/// Shorthand for building a [`Launcher`], setting `sink`, adding `action`
/// under `name` and awaiting [`Launcher::launch`].
pub async fn launch_fn<F, Fut>(name: impl Into<String>, sink: Arc<dyn AlertSink>, action: F)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    let mut launcher = Launcher::new();
    launcher.set_alert_sink(sink);
    launcher.add_fn(name, action);
    launcher.launch().await;
}
