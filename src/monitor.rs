use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time;
use tracing::{debug, error, info, warn};

use crate::platform::PlatformGateway;

/// How often the monitor polls for shield notifications.
///
/// Two seconds keeps the reaction to a blocked app launch feeling
/// immediate without hammering the spool directory.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;

/// Callback invoked when a fresh shield notification arrives.
///
/// Implementations decide what a notification means for the unlock flow;
/// the monitor only guarantees each notification id is delivered at most
/// once per run, and only while it has not expired.
pub trait ShieldEventHandler: Send + Sync {
    fn on_shield_notification(&self, id: &str, now: DateTime<Utc>) -> Result<()>;
}

/// Notification monitor daemon
///
/// Polls the platform gateway on a fixed cadence and hands fresh shield
/// notifications to the event handler. Expired and already-shown
/// notifications are dropped, and a processed-id set makes redelivery
/// harmless even if the gateway reports the same notification twice.
pub struct NotificationMonitor {
    gateway: Arc<dyn PlatformGateway>,
    handler: Arc<dyn ShieldEventHandler>,
    poll_interval: Duration,
    running: Arc<Mutex<bool>>,
    processed: Arc<Mutex<HashSet<String>>>,
}

impl NotificationMonitor {
    pub fn new(
        gateway: Arc<dyn PlatformGateway>,
        handler: Arc<dyn ShieldEventHandler>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            gateway,
            handler,
            poll_interval,
            running: Arc::new(Mutex::new(false)),
            processed: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Start the polling loop
    pub async fn start(&self) -> Result<()> {
        let mut running = self.running.lock().await;
        if *running {
            anyhow::bail!("Notification monitor is already running");
        }
        *running = true;
        drop(running);

        info!(
            "Starting notification monitor (poll every {:?})",
            self.poll_interval
        );

        let gateway = self.gateway.clone();
        let handler = self.handler.clone();
        let running = self.running.clone();
        let processed = self.processed.clone();
        let poll_interval = self.poll_interval;

        tokio::spawn(async move {
            let mut interval = time::interval(poll_interval);

            loop {
                interval.tick().await;

                // Check if we should stop
                if !*running.lock().await {
                    info!("Notification monitor stopped");
                    break;
                }

                if let Err(e) =
                    Self::poll_iteration(&gateway, &handler, &processed, Utc::now()).await
                {
                    error!("Error in notification poll: {:#}", e);
                }
            }
        });

        Ok(())
    }

    /// Stop the polling loop
    pub async fn stop(&self) -> Result<()> {
        let mut running = self.running.lock().await;
        *running = false;
        info!("Stopping notification monitor");
        Ok(())
    }

    pub async fn is_running(&self) -> bool {
        *self.running.lock().await
    }

    /// Number of notifications handled so far in this run.
    pub async fn processed_count(&self) -> usize {
        self.processed.lock().await.len()
    }

    /// Single poll against the gateway. Returns whether the handler fired.
    ///
    /// A notification id is recorded as processed only after the handler
    /// succeeds, so a transient handler failure gets another chance on the
    /// next poll if the gateway still reports the notification as fresh.
    async fn poll_iteration(
        gateway: &Arc<dyn PlatformGateway>,
        handler: &Arc<dyn ShieldEventHandler>,
        processed: &Arc<Mutex<HashSet<String>>>,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let poll = gateway
            .poll_pending_notification(now)
            .context("Failed to poll for shield notifications")?;

        if !poll.pending {
            return Ok(false);
        }

        let id = match poll.id {
            Some(id) => id,
            None => {
                warn!("Gateway reported a pending notification without an id");
                return Ok(false);
            }
        };

        if poll.already_shown {
            debug!("Notification {} already shown, skipping", id);
            return Ok(false);
        }

        let mut processed_ids = processed.lock().await;
        if processed_ids.contains(&id) {
            debug!("Notification {} already processed this run", id);
            return Ok(false);
        }

        if poll.expired {
            info!("Notification {} expired before handling, dropping", id);
            processed_ids.insert(id);
            return Ok(false);
        }
        drop(processed_ids);

        handler
            .on_shield_notification(&id, now)
            .with_context(|| format!("Handler failed for notification {id}"))?;

        processed.lock().await.insert(id.clone());
        info!("Handled shield notification {}", id);
        Ok(true)
    }
}
