//! `exec` command handler: launch one command with retry and alerts.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};

use launchseq::{CommandUnit, Launcher, TracingSink};

pub(crate) async fn cmd_exec(name: String, interval_secs: u64, command: Vec<String>) -> Result<()> {
    let Some((program, args)) = command.split_first() else {
        bail!("no command given");
    };

    let unit = CommandUnit::new(name.as_str(), program.as_str())
        .with_args(args.iter().cloned())
        .with_alert_interval(Duration::from_secs(interval_secs));

    let mut launcher = Launcher::new();
    launcher.set_alert_sink(Arc::new(TracingSink));
    launcher.add_unit(Arc::new(unit));

    tokio::select! {
        _ = launcher.launch() => {
            println!("{} launched", name);
            Ok(())
        }
        _ = tokio::signal::ctrl_c() => {
            bail!("interrupted before '{}' launched", name)
        }
    }
}
