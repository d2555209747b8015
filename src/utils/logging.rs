//! Logging initialization for launchseq.
//!
//! Supports three formats:
//! - `pretty`: default tracing pretty-print (human-readable, coloured)
//! - `component`: compact single-line output; use the [`log_component!`] macro
//!   to add a `component` field for per-subsystem filtering
//! - `json`: structured JSON lines for log aggregators, optionally appended to a file

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};
use crate::error::Result;

/// Build the filter: `RUST_LOG` wins, otherwise `cfg.level`.
pub fn env_filter(cfg: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level))
}

/// Initialize the global tracing subscriber from config.
///
/// Call this once at startup before any tracing events are emitted. A second
/// call is a no-op. Fails only if the configured log file cannot be opened.
pub fn init_logging(cfg: &LoggingConfig) -> Result<()> {
    let filter = env_filter(cfg);

    match cfg.format {
        LogFormat::Json => {
            if let Some(path) = &cfg.file {
                let file = Arc::new(
                    std::fs::OpenOptions::new()
                        .create(true)
                        .append(true)
                        .open(path)?,
                );
                let _ = tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(file)
                    .try_init();
            } else {
                let _ = tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .try_init();
            }
        }
        LogFormat::Pretty => {
            let _ = tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .try_init();
        }
        LogFormat::Component => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .compact()
                .try_init();
        }
    }
    Ok(())
}

/// Emit a component-tagged tracing event.
///
/// ```
/// # use launchseq::log_component;
/// log_component!(info, "launcher", "dependency up");
/// log_component!(warn, "launcher", "retrying", attempt = 3u64);
/// ```
#[macro_export]
macro_rules! log_component {
    ($level:ident, $component:expr, $msg:expr) => {
        tracing::$level!(component = $component, $msg)
    };
    ($level:ident, $component:expr, $msg:expr, $($key:ident = $val:expr),+ $(,)?) => {
        tracing::$level!(component = $component, $($key = $val,)+ $msg)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice_is_ok() {
        let cfg = LoggingConfig::default();
        assert!(init_logging(&cfg).is_ok());
        assert!(init_logging(&cfg).is_ok());
    }

    #[test]
    fn test_json_file_unopenable_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = LoggingConfig {
            format: LogFormat::Json,
            level: "info".to_string(),
            file: Some(dir.path().join("missing").join("log.jsonl").display().to_string()),
        };
        assert!(init_logging(&cfg).is_err());
    }

    #[test]
    fn test_log_component_macro_compiles() {
        crate::log_component!(debug, "test", "hello");
        crate::log_component!(info, "test", "with fields", attempt = 1u64, unit = "db");
    }
}
