use chrono::{DateTime, Utc};

use crate::unlock::session::{REASON_WORKOUT_EXTENDED, UnlockSession};

/// Lifecycle phase of the tracker at a given instant.
///
/// `Expired` is a computed view: the tracker keeps the stale session around
/// until it is explicitly cleared or replaced, so callers can still inspect
/// what the last grant was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No session has been recorded, or the last one was cleared.
    Empty,
    /// A session exists and still has time left.
    Active,
    /// A session exists but its grant is used up.
    Expired,
}

/// Holds the single current unlock session, if any.
///
/// The tracker owns at most one session. Recording a new one replaces the
/// old one wholesale; durations are never merged across grants. Every query
/// takes the reference timestamp as an argument, which makes the whole type
/// deterministic: the same call sequence with the same timestamps always
/// produces the same answers.
#[derive(Debug, Clone, Default)]
pub struct UnlockSessionTracker {
    current: Option<UnlockSession>,
}

impl UnlockSessionTracker {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Start a session of `duration_seconds` at `start_time`, replacing any
    /// existing session regardless of how much time it had left.
    pub fn record_unlock_start(
        &mut self,
        duration_seconds: i64,
        reason: &str,
        start_time: DateTime<Utc>,
    ) {
        self.current = Some(UnlockSession::new(duration_seconds, reason, start_time));
    }

    /// Whole seconds left on the current session at `now`. Zero when there
    /// is no session or the session has run out.
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        match &self.current {
            Some(session) => session.remaining_seconds(now),
            None => 0,
        }
    }

    /// True while the current session still has time left at `now`.
    ///
    /// Defined as `remaining_seconds(now) > 0`, so the two queries can never
    /// disagree. At exactly the session's end instant this is false.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.remaining_seconds(now) > 0
    }

    /// Drop the current session, active or not. Calling this with no
    /// session is a no-op.
    pub fn clear_session(&mut self) {
        self.current = None;
    }

    /// The current session, expired or not. `None` only when no session has
    /// been recorded or the last one was cleared.
    pub fn current_session(&self) -> Option<&UnlockSession> {
        self.current.as_ref()
    }

    /// Add `additional_seconds` to whatever is left on the current session.
    ///
    /// The result is a replacement session starting at `now` whose duration
    /// is the old remaining time plus the increment, tagged with the
    /// extension reason. Extending an expired session therefore grants
    /// exactly `additional_seconds` from `now`. With no session at all this
    /// does nothing: extension never conjures a session out of thin air.
    pub fn extend_session(&mut self, additional_seconds: i64, now: DateTime<Utc>) {
        let Some(session) = &self.current else {
            return;
        };
        let total = session.remaining_seconds(now) + additional_seconds;
        self.current = Some(UnlockSession::new(total, REASON_WORKOUT_EXTENDED, now));
    }

    /// Classify the tracker at `now` without mutating it.
    pub fn phase(&self, now: DateTime<Utc>) -> SessionPhase {
        match &self.current {
            None => SessionPhase::Empty,
            Some(session) if session.is_expired(now) => SessionPhase::Expired,
            Some(_) => SessionPhase::Active,
        }
    }
}
