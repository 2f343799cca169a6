use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use fitlock::config;
use fitlock::gate::{self, GateDecision};
use fitlock::monitor::{NotificationMonitor, ShieldEventHandler};
use fitlock::platform::{self, NativeGateway};
use fitlock::state;

use crate::commands::utils::resolve_config_path;

/// Reacts to fresh shield notifications by reporting the gate decision.
///
/// Each event loads the snapshot anew: the CLI may have granted or cleared
/// a session since the last poll, and the file is the only state the two
/// processes share.
pub struct UnlockPromptHandler {
    snapshot_path: PathBuf,
}

impl UnlockPromptHandler {
    pub fn new(snapshot_path: PathBuf) -> Self {
        Self { snapshot_path }
    }
}

impl ShieldEventHandler for UnlockPromptHandler {
    fn on_shield_notification(&self, id: &str, now: DateTime<Utc>) -> Result<()> {
        let snapshot = state::load_snapshot(&self.snapshot_path)?.unwrap_or_default();
        let tracker = snapshot.rehydrate();

        match gate::evaluate(&tracker, now) {
            GateDecision::Allow { remaining_seconds } => {
                info!(
                    "Shield notification {} while unlocked ({}s left); nothing to do",
                    id, remaining_seconds
                );
            }
            GateDecision::Block => {
                info!(
                    "Shield notification {}: no active unlock session; complete a workout to earn time",
                    id
                );
            }
        }

        Ok(())
    }
}

/// Run the shield notification monitor in the foreground
pub fn run(config_path: Option<PathBuf>) -> Result<()> {
    let config = config::load_or_default(&resolve_config_path(config_path)?)?;
    let snapshot_path = state::default_snapshot_path()?;
    let spool_dir = platform::default_spool_dir()?;

    println!("Fitlock notification monitor");
    println!("  Watching spool: {}", spool_dir.display());
    println!("  Poll interval:  {}s", config.monitor.poll_interval_secs);
    println!("Press Ctrl+C to stop");
    println!();

    let gateway = Arc::new(NativeGateway::with_spool_dir(spool_dir));
    let handler = Arc::new(UnlockPromptHandler::new(snapshot_path));
    let monitor = NotificationMonitor::new(
        gateway,
        handler,
        Duration::from_secs(config.monitor.poll_interval_secs),
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        monitor.start().await?;

        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for Ctrl+C")?;

        monitor.stop().await?;
        println!(
            "\nStopped after handling {} notification(s)",
            monitor.processed_count().await
        );

        Ok(())
    })
}
