use chrono::{DateTime, Utc};

use crate::unlock::service::UnlockSessionService;
use crate::unlock::session::UnlockSession;

/// A recorded call to [`UnlockSessionService::record_unlock_start`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedStart {
    pub duration_seconds: i64,
    pub reason: String,
    pub start_time: DateTime<Utc>,
}

/// Scripted stand-in for [`UnlockSessionService`].
///
/// Queries return whatever the test put in the public fields; commands are
/// appended to call logs instead of changing any real state. This keeps
/// gate and monitor tests independent of the tracker's arithmetic: a test
/// that wants "active with 90 seconds left" just sets those two fields.
#[derive(Debug, Clone, Default)]
pub struct MockUnlockSessionService {
    /// Canned answer for `is_active`.
    pub active: bool,
    /// Canned answer for `remaining_seconds`.
    pub remaining: i64,
    /// Canned answer for `current_session`.
    pub session: Option<UnlockSession>,
    /// Every `record_unlock_start` call, in order.
    pub recorded_starts: Vec<RecordedStart>,
    /// Every `extend_session` call, in order.
    pub extensions: Vec<(i64, DateTime<Utc>)>,
    /// Number of `clear_session` calls.
    pub clear_calls: u32,
}

impl MockUnlockSessionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for the common "active session" script.
    pub fn active_with_remaining(remaining: i64) -> Self {
        Self {
            active: true,
            remaining,
            ..Self::default()
        }
    }
}

impl UnlockSessionService for MockUnlockSessionService {
    fn record_unlock_start(&mut self, duration_seconds: i64, reason: &str, start_time: DateTime<Utc>) {
        self.recorded_starts.push(RecordedStart {
            duration_seconds,
            reason: reason.to_string(),
            start_time,
        });
    }

    fn remaining_seconds(&self, _now: DateTime<Utc>) -> i64 {
        self.remaining
    }

    fn is_active(&self, _now: DateTime<Utc>) -> bool {
        self.active
    }

    fn clear_session(&mut self) {
        self.clear_calls += 1;
    }

    fn current_session(&self) -> Option<&UnlockSession> {
        self.session.as_ref()
    }

    fn extend_session(&mut self, additional_seconds: i64, now: DateTime<Utc>) {
        self.extensions.push((additional_seconds, now));
    }
}
