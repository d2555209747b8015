//! `run` command handler: launch every configured unit.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use launchseq::config::Config;
use launchseq::{Launcher, TracingSink};

pub(crate) async fn cmd_run(config_path: &Path) -> Result<()> {
    let config = Config::load_from_path(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    if config.units.is_empty() {
        println!("No units configured in {}", config_path.display());
        return Ok(());
    }

    let launcher = Launcher::from_config(&config.units);
    launcher.set_alert_sink(Arc::new(TracingSink));
    info!(units = ?launcher.unit_names(), "Starting launch sequence");

    tokio::select! {
        _ = launcher.launch() => {
            println!("All {} unit(s) launched", launcher.len());
            Ok(())
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted before all units were launched");
            anyhow::bail!("interrupted")
        }
    }
}
