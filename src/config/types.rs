//! Configuration type definitions for launchseq
//!
//! All types implement serde traits for JSON serialization and have sensible defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::unit::DEFAULT_ALERT_INTERVAL;

/// Main configuration struct for launchseq
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging output configuration
    pub logging: LoggingConfig,
    /// Units to launch, in order
    pub units: Vec<UnitConfig>,
}

// ============================================================================
// Logging Configuration
// ============================================================================

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output
    Pretty,
    /// Compact single-line output with a `component` field where tagged
    #[default]
    Component,
    /// JSON lines for log aggregators
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "component" => Ok(LogFormat::Component),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Default filter level when `RUST_LOG` is unset
    pub level: String,
    /// Optional file to append JSON logs to
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Component,
            level: "info".to_string(),
            file: None,
        }
    }
}

// ============================================================================
// Unit Configuration
// ============================================================================

fn default_connect_timeout_secs() -> u64 {
    3
}

/// One launch unit definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UnitConfig {
    /// Run an external command; exit status 0 means up.
    Command {
        name: String,
        command: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default)]
        alert_interval_secs: Option<u64>,
    },
    /// Wait for a TCP endpoint to accept connections.
    Tcp {
        name: String,
        host: String,
        port: u16,
        #[serde(default = "default_connect_timeout_secs")]
        connect_timeout_secs: u64,
        #[serde(default)]
        alert_interval_secs: Option<u64>,
    },
}

impl UnitConfig {
    pub fn name(&self) -> &str {
        match self {
            UnitConfig::Command { name, .. } | UnitConfig::Tcp { name, .. } => name,
        }
    }

    /// Configured alert interval; unset or zero means the default.
    pub fn alert_interval(&self) -> Duration {
        let secs = match self {
            UnitConfig::Command {
                alert_interval_secs,
                ..
            }
            | UnitConfig::Tcp {
                alert_interval_secs,
                ..
            } => *alert_interval_secs,
        };
        match secs {
            Some(s) if s > 0 => Duration::from_secs(s),
            _ => DEFAULT_ALERT_INTERVAL,
        }
    }
}
