use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

use crate::unlock::{UnlockSession, UnlockSessionTracker};

/// Current snapshot version
const SNAPSHOT_VERSION: &str = "1.0";

/// Everything fitlock persists between invocations.
///
/// The CLI commands and the monitor run in separate processes, so the
/// snapshot file is the only thing they share. Each of them loads it,
/// rebuilds a tracker, acts, and writes it back; nobody keeps a long-lived
/// in-memory copy.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Snapshot {
    pub version: String,
    /// Random id minted the first time this device creates a snapshot.
    pub device_id: String,
    /// The current unlock session, if any was recorded and not cleared.
    pub session: Option<UnlockSession>,
    /// Lifetime count of workouts that granted sessions.
    #[serde(default)]
    pub workouts_completed: u32,
    /// When the rating prompt was shown, if ever.
    #[serde(default)]
    pub rating_prompted_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Create a new empty snapshot with a fresh device id
    pub fn new() -> Self {
        Self {
            version: SNAPSHOT_VERSION.to_string(),
            device_id: Uuid::new_v4().to_string(),
            session: None,
            workouts_completed: 0,
            rating_prompted_at: None,
        }
    }

    /// Copy the tracker's session into the snapshot.
    pub fn capture(&mut self, tracker: &UnlockSessionTracker) {
        self.session = tracker.current_session().cloned();
    }

    /// Rebuild a tracker from the stored session.
    ///
    /// Replaying the stored parameters through the tracker reproduces the
    /// original session (including its derived id), so a rehydrated
    /// tracker is indistinguishable from the one that was captured.
    pub fn rehydrate(&self) -> UnlockSessionTracker {
        let mut tracker = UnlockSessionTracker::new();
        if let Some(session) = &self.session {
            tracker.record_unlock_start(
                session.duration_seconds(),
                session.reason(),
                session.start_time(),
            );
        }
        tracker
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a snapshot from file
///
/// Returns `Ok(None)` when the file does not exist or carries an
/// unexpected version; in both cases the caller starts fresh.
pub fn load_snapshot(path: &Path) -> Result<Option<Snapshot>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;

    let snapshot: Snapshot = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse snapshot file: {}", path.display()))?;

    // Validate snapshot version
    if snapshot.version != SNAPSHOT_VERSION {
        warn!(
            "Snapshot version mismatch (expected {}, got {}). Starting fresh.",
            SNAPSHOT_VERSION, snapshot.version
        );
        return Ok(None);
    }

    Ok(Some(snapshot))
}

/// Save a snapshot to file
pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let content =
        serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?;

    crate::platform::common::atomic_write(path, content.as_bytes())
        .with_context(|| format!("Failed to write snapshot file: {}", path.display()))?;

    Ok(())
}

/// Delete the snapshot file
pub fn delete_snapshot(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)
            .with_context(|| format!("Failed to delete snapshot file: {}", path.display()))?;
    }

    Ok(())
}

/// Per-user location of the snapshot file.
pub fn default_snapshot_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "fitlock")
        .context("Failed to determine platform directories")?;
    Ok(dirs.data_local_dir().join("snapshot.json"))
}
