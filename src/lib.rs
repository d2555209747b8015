//! launchseq - sequential dependency launcher
//!
//! Starts named dependencies one after another, retrying each forever until
//! it succeeds, and alerts while an attempt runs longer than expected.

pub mod alert;
pub mod config;
pub mod error;
pub mod launcher;
pub mod unit;
pub mod utils;

pub use alert::{AlertSink, ChannelSink, MemorySink, TracingSink};
pub use config::Config;
pub use error::{LaunchError, Result};
pub use launcher::{launch_fn, Launcher};
pub use unit::{
    BlockingFnUnit, CommandUnit, FnUnit, LaunchUnit, TcpUnit, DEFAULT_ALERT_INTERVAL,
    MAX_ALERT_INTERVAL,
};
