//! Closure-backed launch units.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;

use super::{normalize_interval, LaunchUnit, DEFAULT_ALERT_INTERVAL};
use crate::error::{LaunchError, Result};

type AsyncAction = Box<dyn Fn() -> BoxFuture<'static, Result<()>> + Send + Sync>;
type BlockingAction = Arc<dyn Fn() -> Result<()> + Send + Sync>;

/// A launch unit wrapping an async closure.
///
/// ```
/// use launchseq::FnUnit;
///
/// let unit = FnUnit::new("cache", || async { Ok(()) });
/// ```
pub struct FnUnit {
    name: String,
    alert_interval: Duration,
    action: AsyncAction,
}

impl FnUnit {
    /// Wrap `action` under `name`, using [`DEFAULT_ALERT_INTERVAL`].
    pub fn new<F, Fut>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            alert_interval: DEFAULT_ALERT_INTERVAL,
            action: Box::new(move || action().boxed()),
        }
    }

    /// Set an explicit alert interval. Zero keeps the default.
    pub fn with_alert_interval(mut self, interval: Duration) -> Self {
        self.alert_interval = normalize_interval(interval);
        self
    }
}

impl std::fmt::Debug for FnUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnUnit")
            .field("name", &self.name)
            .field("alert_interval", &self.alert_interval)
            .finish()
    }
}

#[async_trait]
impl LaunchUnit for FnUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn alert_interval(&self) -> Duration {
        self.alert_interval
    }

    async fn launch(&self) -> Result<()> {
        (self.action)().await
    }
}

/// A launch unit wrapping a synchronous, possibly blocking closure.
///
/// The closure runs on tokio's blocking pool so it never stalls the timer
/// that emits timeout alerts.
pub struct BlockingFnUnit {
    name: String,
    alert_interval: Duration,
    action: BlockingAction,
}

impl BlockingFnUnit {
    pub fn new<F>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn() -> Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            alert_interval: DEFAULT_ALERT_INTERVAL,
            action: Arc::new(action),
        }
    }

    /// Set an explicit alert interval. Zero keeps the default.
    pub fn with_alert_interval(mut self, interval: Duration) -> Self {
        self.alert_interval = normalize_interval(interval);
        self
    }
}

impl std::fmt::Debug for BlockingFnUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingFnUnit")
            .field("name", &self.name)
            .field("alert_interval", &self.alert_interval)
            .finish()
    }
}

#[async_trait]
impl LaunchUnit for BlockingFnUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn alert_interval(&self) -> Duration {
        self.alert_interval
    }

    async fn launch(&self) -> Result<()> {
        let action = Arc::clone(&self.action);
        tokio::task::spawn_blocking(move || action())
            .await
            .map_err(LaunchError::from_join)?
    }
}
