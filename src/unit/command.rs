//! External command launch unit.

use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::{normalize_interval, LaunchUnit, DEFAULT_ALERT_INTERVAL};
use crate::error::{LaunchError, Result};

/// Maximum stderr bytes carried into the failure reason.
const MAX_STDERR_LEN: usize = 512;

/// Runs a program once per launch; exit status 0 means the dependency is up.
///
/// Typical uses are readiness probes (`pg_isready`, `redis-cli ping`) and
/// one-shot setup steps (schema migrations).
#[derive(Debug, Clone)]
pub struct CommandUnit {
    name: String,
    program: String,
    args: Vec<String>,
    alert_interval: Duration,
}

impl CommandUnit {
    pub fn new(name: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: Vec::new(),
            alert_interval: DEFAULT_ALERT_INTERVAL,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set an explicit alert interval. Zero keeps the default.
    pub fn with_alert_interval(mut self, interval: Duration) -> Self {
        self.alert_interval = normalize_interval(interval);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

#[async_trait]
impl LaunchUnit for CommandUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn alert_interval(&self) -> Duration {
        self.alert_interval
    }

    async fn launch(&self) -> Result<()> {
        debug!(unit = %self.name, program = %self.program, args = ?self.args, "Running launch command");
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(std::process::Stdio::null())
            .output()
            .await?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = truncate(stderr.trim(), MAX_STDERR_LEN);
        if stderr.is_empty() {
            Err(LaunchError::Command(output.status.to_string()))
        } else {
            Err(LaunchError::Command(format!("{}: {}", output.status, stderr)))
        }
    }
}

/// Truncate on a char boundary at or below `max` bytes.
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
