use chrono::{DateTime, Utc};

use crate::unlock::session::UnlockSession;
use crate::unlock::tracker::UnlockSessionTracker;

/// Contract for anything that manages the single unlock session.
///
/// The shield gate and the notification monitor talk to this trait rather
/// than to [`UnlockSessionTracker`] directly, so tests can substitute
/// [`MockUnlockSessionService`](crate::unlock::MockUnlockSessionService)
/// and script whatever state they need. Every query takes the reference
/// timestamp explicitly; implementations must never read a clock.
pub trait UnlockSessionService {
    /// Start a session of `duration_seconds` at `start_time`, replacing any
    /// existing session.
    fn record_unlock_start(&mut self, duration_seconds: i64, reason: &str, start_time: DateTime<Utc>);

    /// Whole seconds left at `now`, zero when nothing is active.
    fn remaining_seconds(&self, now: DateTime<Utc>) -> i64;

    /// True exactly when `remaining_seconds(now)` is positive.
    fn is_active(&self, now: DateTime<Utc>) -> bool;

    /// Drop the current session. Safe to call with none.
    fn clear_session(&mut self);

    /// The current session, if one has been recorded and not cleared.
    fn current_session(&self) -> Option<&UnlockSession>;

    /// Fold the remaining time plus `additional_seconds` into a fresh
    /// session starting at `now`. No-op when there is no session.
    fn extend_session(&mut self, additional_seconds: i64, now: DateTime<Utc>);
}

impl UnlockSessionService for UnlockSessionTracker {
    fn record_unlock_start(&mut self, duration_seconds: i64, reason: &str, start_time: DateTime<Utc>) {
        UnlockSessionTracker::record_unlock_start(self, duration_seconds, reason, start_time);
    }

    fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        UnlockSessionTracker::remaining_seconds(self, now)
    }

    fn is_active(&self, now: DateTime<Utc>) -> bool {
        UnlockSessionTracker::is_active(self, now)
    }

    fn clear_session(&mut self) {
        UnlockSessionTracker::clear_session(self);
    }

    fn current_session(&self) -> Option<&UnlockSession> {
        UnlockSessionTracker::current_session(self)
    }

    fn extend_session(&mut self, additional_seconds: i64, now: DateTime<Utc>) {
        UnlockSessionTracker::extend_session(self, additional_seconds, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unlock::session::REASON_WORKOUT_COMPLETED;
    use chrono::TimeZone;

    fn make_test_time(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_tracker_usable_through_trait_object() {
        let mut tracker = UnlockSessionTracker::new();
        let t0 = make_test_time(1_700_000_000);

        let service: &mut dyn UnlockSessionService = &mut tracker;
        service.record_unlock_start(600, REASON_WORKOUT_COMPLETED, t0);

        assert!(service.is_active(t0));
        assert_eq!(service.remaining_seconds(t0), 600);
        assert_eq!(service.current_session().unwrap().duration_seconds(), 600);

        service.clear_session();
        assert!(!service.is_active(t0));
    }
}
