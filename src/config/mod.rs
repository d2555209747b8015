//! Configuration management for launchseq
//!
//! Configuration is loaded from `~/.launchseq/config.json` with environment
//! variable overrides. A missing file means defaults (no units, info logging).

mod types;
pub mod validate;

pub use types::*;

use std::path::{Path, PathBuf};

use crate::error::{LaunchError, Result};

impl Config {
    /// Returns the launchseq configuration directory path (~/.launchseq)
    pub fn dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".launchseq")
    }

    /// Returns the path to the config file (~/.launchseq/config.json)
    pub fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load configuration from the default path with environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::path())
    }

    /// Load configuration from a specific path with environment overrides.
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content).map_err(|e| {
                LaunchError::Config(format!("{}: {}", path.display(), e))
            })?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Environment variables follow the pattern: LAUNCHSEQ_SECTION_KEY
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("LAUNCHSEQ_LOGGING_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("LAUNCHSEQ_LOGGING_FORMAT") {
            if let Ok(format) = val.parse() {
                self.logging.format = format;
            }
        }
        if let Ok(val) = std::env::var("LAUNCHSEQ_LOGGING_FILE") {
            self.logging.file = if val.is_empty() { None } else { Some(val) };
        }
    }
}
