//! TCP reachability launch unit.

use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;

use super::{normalize_interval, LaunchUnit, DEFAULT_ALERT_INTERVAL};
use crate::error::{LaunchError, Result};

/// Default cap on a single connect attempt.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Succeeds once `host:port` accepts a TCP connection. The connection is
/// closed immediately.
#[derive(Debug, Clone)]
pub struct TcpUnit {
    name: String,
    host: String,
    port: u16,
    connect_timeout: Duration,
    alert_interval: Duration,
}

impl TcpUnit {
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            alert_interval: DEFAULT_ALERT_INTERVAL,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.connect_timeout = timeout;
        }
        self
    }

    /// Set an explicit alert interval. Zero keeps the default.
    pub fn with_alert_interval(mut self, interval: Duration) -> Self {
        self.alert_interval = normalize_interval(interval);
        self
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[async_trait]
impl LaunchUnit for TcpUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn alert_interval(&self) -> Duration {
        self.alert_interval
    }

    async fn launch(&self) -> Result<()> {
        let connect = TcpStream::connect((self.host.as_str(), self.port));
        match tokio::time::timeout(self.connect_timeout, connect).await {
            Ok(Ok(_stream)) => Ok(()),
            Ok(Err(e)) => Err(LaunchError::failed(format!(
                "connect {}: {}",
                self.address(),
                e
            ))),
            Err(_) => Err(LaunchError::failed(format!(
                "connect {}: timed out after {:?}",
                self.address(),
                self.connect_timeout
            ))),
        }
    }
}
