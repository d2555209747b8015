//! CLI module: command parsing and dispatch
//!
//! All CLI logic lives here. `main.rs` calls `cli::run()`.

pub mod config;
pub mod exec;
pub mod run;

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use launchseq::config::Config;

#[derive(Parser)]
#[command(name = "launchseq")]
#[command(version)]
#[command(about = "Launch dependencies in order, retrying each until it is up", long_about = None)]
struct Cli {
    /// Config file (default: ~/.launchseq/config.json)
    #[arg(id = "config_path", long = "config", global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch every configured unit in order
    Run,
    /// Launch a single command with retry and stall alerts
    Exec {
        /// Unit name used in alerts
        #[arg(long)]
        name: String,
        /// Seconds between stall alerts and between retries (0 = default)
        #[arg(long, default_value_t = 0)]
        interval_secs: u64,
        /// Program and arguments, after `--`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Validate configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Check the config file for errors and unknown fields
    Check,
}

/// Resolve the config file path from the flag or the default location.
pub(crate) fn config_path(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(Config::path)
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let path = config_path(cli.config);

    // Respect logging settings from the config file; fall back to defaults if
    // it is missing or unreadable (`config check` reports the problem).
    let logging_cfg = Config::load_from_path(&path)
        .map(|c| c.logging)
        .unwrap_or_default();
    launchseq::utils::logging::init_logging(&logging_cfg)?;

    match cli.command {
        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
            println!();
        }
        Some(Commands::Version) => {
            cmd_version();
        }
        Some(Commands::Run) => {
            run::cmd_run(&path).await?;
        }
        Some(Commands::Exec {
            name,
            interval_secs,
            command,
        }) => {
            exec::cmd_exec(name, interval_secs, command).await?;
        }
        Some(Commands::Config { action }) => {
            config::cmd_config(action, &path)?;
        }
    }

    Ok(())
}

/// Display version information
fn cmd_version() {
    println!("launchseq {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Sequential dependency launcher");
}
