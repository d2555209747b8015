//! Launch units: the things a [`Launcher`](crate::launcher::Launcher) starts.
//!
//! A unit is anything that has a name, an alert interval and an async launch
//! action. Built-in units:
//!
//! - [`FnUnit`]: wraps an async closure
//! - [`BlockingFnUnit`]: wraps a synchronous closure, run on the blocking pool
//! - [`CommandUnit`]: runs an external command, succeeds on exit status 0
//! - [`TcpUnit`]: succeeds once a TCP connection is accepted

pub mod command;
pub mod func;
pub mod tcp;

pub use command::CommandUnit;
pub use func::{BlockingFnUnit, FnUnit};
pub use tcp::TcpUnit;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::UnitConfig;
use crate::error::Result;

/// Upper alert interval constant. Also the default interval.
///
/// Explicit intervals longer than this are accepted as-is; nothing caps them.
pub const MAX_ALERT_INTERVAL: Duration = Duration::from_secs(5);

/// Alert interval used when a unit does not set one.
pub const DEFAULT_ALERT_INTERVAL: Duration = MAX_ALERT_INTERVAL;

/// A named startup task with an alert interval and a launch action.
///
/// `launch` may be called many times: the launcher retries it until it
/// returns `Ok(())`. It may also run for an unbounded time; the launcher
/// never cancels it.
#[async_trait]
pub trait LaunchUnit: Send + Sync {
    /// Name used in alert messages and logs. Need not be unique.
    fn name(&self) -> &str;

    /// Period between "still running" alerts, also the pause between retries.
    fn alert_interval(&self) -> Duration {
        DEFAULT_ALERT_INTERVAL
    }

    /// Run the launch action once.
    async fn launch(&self) -> Result<()>;
}

/// Map an unset (zero) interval to [`DEFAULT_ALERT_INTERVAL`].
pub fn normalize_interval(interval: Duration) -> Duration {
    if interval.is_zero() {
        DEFAULT_ALERT_INTERVAL
    } else {
        interval
    }
}

/// Build a unit from its config entry.
pub fn from_config(cfg: &UnitConfig) -> Arc<dyn LaunchUnit> {
    match cfg {
        UnitConfig::Command {
            name,
            command,
            args,
            ..
        } => Arc::new(
            CommandUnit::new(name.clone(), command.clone())
                .with_args(args.clone())
                .with_alert_interval(cfg.alert_interval()),
        ),
        UnitConfig::Tcp {
            name,
            host,
            port,
            connect_timeout_secs,
            ..
        } => Arc::new(
            TcpUnit::new(name.clone(), host.clone(), *port)
                .with_connect_timeout(Duration::from_secs(*connect_timeout_secs))
                .with_alert_interval(cfg.alert_interval()),
        ),
    }
}
