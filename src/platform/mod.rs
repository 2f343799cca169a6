//! Platform bridge for the pieces the session model cannot own.
//!
//! Two capabilities live behind [`PlatformGateway`]: asking the user for an
//! app-store style rating, and finding out whether the shield has fired a
//! notification. Everything above this layer stays deterministic and
//! testable; the messy OS details end here.

pub mod common;
pub mod spool;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "linux")]
pub mod linux;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Result of one notification poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPoll {
    /// A shield notification exists (fresh, lingering or expired).
    pub pending: bool,
    /// The notification's validity window has passed.
    pub expired: bool,
    /// The notification was already handed out by an earlier poll.
    pub already_shown: bool,
    /// Identifier of the notification, when one exists.
    pub id: Option<String>,
}

impl NotificationPoll {
    /// The "nothing waiting" answer.
    pub fn none() -> Self {
        Self {
            pending: false,
            expired: false,
            already_shown: false,
            id: None,
        }
    }
}

/// Host capabilities the monitor and CLI depend on.
///
/// Both operations are idempotent from the caller's point of view: polling
/// with nothing new waiting reports the same lingering state, and the
/// rating prompt can be requested again after a refusal. Implementations
/// may talk to the OS, so unlike the session model they return `Result`.
pub trait PlatformGateway: Send + Sync {
    /// Ask the user to rate the app. Returns whether they accepted.
    fn request_rating_prompt(&self) -> Result<bool>;

    /// Check for a shield notification at `now`.
    fn poll_pending_notification(&self, now: DateTime<Utc>) -> Result<NotificationPoll>;
}

/// Production gateway backed by the notification spool and the desktop's
/// native dialog tooling.
pub struct NativeGateway {
    spool_dir: PathBuf,
}

impl NativeGateway {
    pub fn new() -> Result<Self> {
        Ok(Self {
            spool_dir: default_spool_dir()?,
        })
    }

    /// Use an explicit spool directory instead of the per-user default.
    pub fn with_spool_dir(spool_dir: PathBuf) -> Self {
        Self { spool_dir }
    }
}

impl PlatformGateway for NativeGateway {
    fn request_rating_prompt(&self) -> Result<bool> {
        request_rating_prompt()
    }

    fn poll_pending_notification(&self, now: DateTime<Utc>) -> Result<NotificationPoll> {
        spool::poll_spool(&self.spool_dir, now)
    }
}

/// Show the native rating prompt for the current platform.
pub fn request_rating_prompt() -> Result<bool> {
    #[cfg(target_os = "windows")]
    {
        windows::request_rating_prompt()
    }

    #[cfg(target_os = "macos")]
    {
        macos::request_rating_prompt()
    }

    #[cfg(target_os = "linux")]
    {
        linux::request_rating_prompt()
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        anyhow::bail!("Rating prompts are not supported on this operating system")
    }
}

/// Per-user spool directory the shield side and the monitor agree on.
pub fn default_spool_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "fitlock")
        .context("Failed to determine platform directories")?;
    Ok(dirs.data_local_dir().join("spool"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    #[test]
    fn test_none_poll_is_all_clear() {
        let poll = NotificationPoll::none();
        assert!(!poll.pending);
        assert!(!poll.expired);
        assert!(!poll.already_shown);
        assert!(poll.id.is_none());
    }

    #[test]
    fn test_native_gateway_polls_its_spool() {
        let temp_dir = tempdir().unwrap();
        let gateway = NativeGateway::with_spool_dir(temp_dir.path().to_path_buf());

        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let poll = gateway.poll_pending_notification(now).unwrap();
        assert_eq!(poll, NotificationPoll::none());
    }

    #[test]
    fn test_default_spool_dir_ends_with_spool() {
        let dir = default_spool_dir().unwrap();
        assert!(dir.ends_with("spool"));
    }
}
