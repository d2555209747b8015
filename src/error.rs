//! Error types for launchseq
//!
//! Uses `thiserror` for ergonomic error handling with automatic `Display` and
//! `Error` trait implementations. Launch errors never escape
//! [`Launcher::launch`](crate::launcher::Launcher::launch); they are turned
//! into alerts and retried.

use std::any::Any;

use thiserror::Error;
use tokio::task::JoinError;

/// The primary error type for launchseq operations.
#[derive(Error, Debug)]
pub enum LaunchError {
    /// A launch action reported a failure.
    #[error("{0}")]
    Failed(String),

    /// A launch action panicked. Treated as an ordinary failure and retried.
    #[error("panicked: {0}")]
    Panicked(String),

    /// An external command exited unsuccessfully.
    #[error("command failed: {0}")]
    Command(String),

    /// Configuration-related errors (invalid config, unreadable file, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Standard I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors raised by launch actions written against `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LaunchError {
    /// Shorthand for a plain failure reason.
    pub fn failed(reason: impl Into<String>) -> Self {
        LaunchError::Failed(reason.into())
    }

    /// Map a failed task join onto a launch error.
    ///
    /// Panics keep their payload message; cancellation becomes a plain failure.
    pub fn from_join(err: JoinError) -> Self {
        if err.is_panic() {
            LaunchError::Panicked(panic_message(err.into_panic()))
        } else {
            LaunchError::Failed(err.to_string())
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// A specialized `Result` type for launchseq operations.
pub type Result<T> = std::result::Result<T, LaunchError>;
