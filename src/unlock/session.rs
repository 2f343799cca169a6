use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Reason tag recorded when a session is granted for a finished workout.
pub const REASON_WORKOUT_COMPLETED: &str = "workout_completed";
/// Reason tag recorded when an existing session is extended.
pub const REASON_WORKOUT_EXTENDED: &str = "workout_extended";

/// A single grant of screen time earned by completing a workout.
///
/// A session is a value: once constructed it never changes. Whether it is
/// still active is always computed against a caller-supplied timestamp, so
/// the same session can be inspected at different instants (or replayed in
/// tests) without any hidden clock access.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UnlockSession {
    id: String,
    start_time: DateTime<Utc>,
    duration_seconds: i64,
    reason: String,
}

impl UnlockSession {
    /// Create a session starting at `start_time` and lasting
    /// `duration_seconds`.
    ///
    /// The id is derived from the start instant, so recording the same
    /// parameters again (for example when rebuilding state from a snapshot)
    /// yields the same id. Callers are expected to pass a non-negative
    /// duration; a zero duration produces a session that is already over.
    pub fn new(duration_seconds: i64, reason: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            id: derive_session_id(start_time),
            start_time,
            duration_seconds,
            reason: reason.into(),
        }
    }

    /// Stable identifier derived from the start instant.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Instant the session began.
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Total granted length in seconds.
    pub fn duration_seconds(&self) -> i64 {
        self.duration_seconds
    }

    /// Why the session was granted (e.g. `workout_completed`).
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Instant the session ends. The session is no longer active at this
    /// exact instant, only strictly before it.
    pub fn end_time(&self) -> DateTime<Utc> {
        self.start_time + Duration::seconds(self.duration_seconds)
    }

    /// Whole seconds left at `now`, clamped to zero once the grant is used
    /// up. Never negative, no matter how far past the end `now` is.
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        let elapsed = (now - self.start_time).num_seconds();
        (self.duration_seconds - elapsed).max(0)
    }

    /// True once the grant is used up at `now`. The boundary is exclusive:
    /// at exactly `end_time()` the session counts as expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.remaining_seconds(now) == 0
    }
}

/// Derive the session id for a session starting at `start_time`.
///
/// Millisecond precision keeps ids from distinct grants distinct in
/// practice while staying reproducible for the same start instant.
pub fn derive_session_id(start_time: DateTime<Utc>) -> String {
    format!("unlock-{}", start_time.timestamp_millis())
}
