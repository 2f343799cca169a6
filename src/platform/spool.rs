use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::platform::NotificationPoll;
use crate::platform::common::atomic_write;

/// A shield notification waiting to be picked up by the monitor.
///
/// The shield side drops one JSON marker file per notification into the
/// spool directory; the monitor polls the directory and consumes them.
/// Files keep the handoff working across restarts of either process, and
/// the `shown` flag survives with the file, so a notification is never
/// reported as fresh twice.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NotificationMarker {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub shown: bool,
}

impl NotificationMarker {
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            created_at,
            expires_at,
            shown: false,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Write a marker into the spool directory.
///
/// The file name leads with the creation timestamp so directory listings
/// sort chronologically. This is the writer half of the handoff; the shield
/// integration calls it when a blocked launch fires a notification.
pub fn write_marker(dir: &Path, marker: &NotificationMarker) -> Result<PathBuf> {
    let file_name = format!("{}-{}.json", marker.created_at.timestamp_millis(), marker.id);
    let path = dir.join(file_name);

    let content = serde_json::to_string_pretty(marker)
        .context("Failed to serialize notification marker")?;
    atomic_write(&path, content.as_bytes())
        .with_context(|| format!("Failed to write notification marker: {}", path.display()))?;

    Ok(path)
}

/// Poll the spool directory for the current notification.
///
/// The oldest marker not yet shown wins and is marked shown in place, so
/// the next poll moves on instead of reporting it fresh again. Expired
/// markers are consumed the same way; otherwise a stale marker would mask
/// newer ones forever. If every marker has been shown, the newest one is
/// reported with `already_shown` set, mirroring how a delivered
/// notification lingers until dismissed.
///
/// A missing spool directory just means no notifications yet.
pub fn poll_spool(dir: &Path, now: DateTime<Utc>) -> Result<NotificationPoll> {
    if !dir.exists() {
        return Ok(NotificationPoll::none());
    }

    let mut markers = read_markers(dir)?;
    if markers.is_empty() {
        return Ok(NotificationPoll::none());
    }

    // Oldest first; file name breaks created_at ties.
    markers.sort_by(|a, b| a.1.created_at.cmp(&b.1.created_at).then(a.0.cmp(&b.0)));

    if let Some((path, marker)) = markers.iter().find(|(_, m)| !m.shown) {
        let expired = marker.is_expired(now);
        debug!(
            "Consuming notification marker {} (expired: {})",
            marker.id, expired
        );

        let mut consumed = marker.clone();
        consumed.shown = true;
        let content = serde_json::to_string_pretty(&consumed)
            .context("Failed to serialize notification marker")?;
        atomic_write(path, content.as_bytes())
            .with_context(|| format!("Failed to update notification marker: {}", path.display()))?;

        return Ok(NotificationPoll {
            pending: true,
            expired,
            already_shown: false,
            id: Some(marker.id.clone()),
        });
    }

    // Everything has been shown; report the newest one as lingering.
    // TODO: prune consumed markers once the shield writer settles on a
    // retention window.
    let (_, newest) = markers
        .last()
        .context("Marker list unexpectedly empty after sort")?;
    Ok(NotificationPoll {
        pending: true,
        expired: newest.is_expired(now),
        already_shown: true,
        id: Some(newest.id.clone()),
    })
}

/// Read and parse every marker file in the spool directory.
///
/// Unparseable files are skipped with a warning rather than failing the
/// poll; one corrupt marker should not wedge the whole monitor.
fn read_markers(dir: &Path) -> Result<Vec<(PathBuf, NotificationMarker)>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read spool directory: {}", dir.display()))?;

    let mut markers = Vec::new();
    for entry in entries {
        let entry = entry.context("Failed to read spool directory entry")?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping unreadable marker {}: {}", path.display(), e);
                continue;
            }
        };
        match serde_json::from_str::<NotificationMarker>(&content) {
            Ok(marker) => markers.push((path, marker)),
            Err(e) => {
                warn!("Skipping malformed marker {}: {}", path.display(), e);
            }
        }
    }

    Ok(markers)
}
