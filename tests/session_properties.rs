//! Property tests for the unlock session arithmetic.
//!
//! The session model promises a handful of algebraic facts: activity and
//! remaining time always agree, remaining time never goes back up, clearing
//! is idempotent, and extensions fold leftover time into the new grant.
//! These hold for arbitrary instants and durations, so they are checked
//! with generated inputs rather than hand-picked examples.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use fitlock::unlock::{REASON_WORKOUT_COMPLETED, SessionPhase, UnlockSessionTracker};

fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// Epoch seconds comfortably inside chrono's range.
fn arb_epoch() -> impl Strategy<Value = i64> {
    0i64..4_000_000_000
}

/// Session durations up to a day.
fn arb_duration() -> impl Strategy<Value = i64> {
    0i64..86_400
}

proptest! {
    /// `is_active` is defined by `remaining_seconds`, so the two can never
    /// disagree, even before the session starts or long after it ends.
    #[test]
    fn active_iff_remaining_positive(
        t0 in arb_epoch(),
        duration in arb_duration(),
        offset in -1_000i64..200_000,
    ) {
        let mut tracker = UnlockSessionTracker::new();
        tracker.record_unlock_start(duration, REASON_WORKOUT_COMPLETED, ts(t0));

        let now = ts(t0 + offset);
        prop_assert_eq!(tracker.is_active(now), tracker.remaining_seconds(now) > 0);
    }

    /// Remaining time never increases as the reference instant advances.
    #[test]
    fn remaining_is_non_increasing(
        t0 in arb_epoch(),
        duration in arb_duration(),
        first in 0i64..200_000,
        step in 0i64..200_000,
    ) {
        let mut tracker = UnlockSessionTracker::new();
        tracker.record_unlock_start(duration, REASON_WORKOUT_COMPLETED, ts(t0));

        let earlier = tracker.remaining_seconds(ts(t0 + first));
        let later = tracker.remaining_seconds(ts(t0 + first + step));
        prop_assert!(later <= earlier);
        prop_assert!(later >= 0);
    }

    /// At the start the whole grant remains; at the end instant nothing
    /// does, and the session is no longer active.
    #[test]
    fn full_at_start_spent_at_end(t0 in arb_epoch(), duration in arb_duration()) {
        let mut tracker = UnlockSessionTracker::new();
        tracker.record_unlock_start(duration, REASON_WORKOUT_COMPLETED, ts(t0));

        prop_assert_eq!(tracker.remaining_seconds(ts(t0)), duration);
        prop_assert_eq!(tracker.remaining_seconds(ts(t0 + duration)), 0);
        prop_assert!(!tracker.is_active(ts(t0 + duration)));
    }

    /// Extending mid-session yields exactly "what was left plus the
    /// increment", counted from the extension instant.
    #[test]
    fn extension_folds_remaining_time(
        t0 in arb_epoch(),
        duration in arb_duration(),
        elapsed in 0i64..172_800,
        additional in 0i64..36_000,
    ) {
        let mut tracker = UnlockSessionTracker::new();
        tracker.record_unlock_start(duration, REASON_WORKOUT_COMPLETED, ts(t0));

        let at_extension = ts(t0 + elapsed);
        let left_before = tracker.remaining_seconds(at_extension);
        tracker.extend_session(additional, at_extension);

        prop_assert_eq!(tracker.remaining_seconds(at_extension), left_before + additional);

        let session = tracker.current_session().unwrap();
        prop_assert_eq!(session.start_time(), at_extension);
    }

    /// A second grant wipes out the first; no time carries over.
    #[test]
    fn new_grant_replaces_old(
        t0 in arb_epoch(),
        first_duration in arb_duration(),
        second_duration in arb_duration(),
        gap in 0i64..86_400,
    ) {
        let mut tracker = UnlockSessionTracker::new();
        tracker.record_unlock_start(first_duration, REASON_WORKOUT_COMPLETED, ts(t0));

        let t1 = ts(t0 + gap);
        tracker.record_unlock_start(second_duration, REASON_WORKOUT_COMPLETED, t1);

        prop_assert_eq!(tracker.remaining_seconds(t1), second_duration);
        prop_assert_eq!(tracker.current_session().unwrap().duration_seconds(), second_duration);
    }

    /// Clearing is idempotent and always lands in the empty phase.
    #[test]
    fn clear_is_idempotent(t0 in arb_epoch(), duration in arb_duration()) {
        let mut tracker = UnlockSessionTracker::new();
        tracker.record_unlock_start(duration, REASON_WORKOUT_COMPLETED, ts(t0));

        tracker.clear_session();
        prop_assert_eq!(tracker.phase(ts(t0)), SessionPhase::Empty);

        tracker.clear_session();
        prop_assert_eq!(tracker.phase(ts(t0)), SessionPhase::Empty);
        prop_assert!(tracker.current_session().is_none());
    }

    /// The session id is a pure function of the start instant.
    #[test]
    fn session_id_is_reproducible(t0 in arb_epoch(), duration in arb_duration()) {
        let mut a = UnlockSessionTracker::new();
        let mut b = UnlockSessionTracker::new();
        a.record_unlock_start(duration, REASON_WORKOUT_COMPLETED, ts(t0));
        b.record_unlock_start(duration, REASON_WORKOUT_COMPLETED, ts(t0));

        prop_assert_eq!(
            a.current_session().unwrap().id(),
            b.current_session().unwrap().id()
        );
    }
}

#[test]
fn worked_example_extension_composes() {
    // 100 seconds granted at t0; 30 seconds later an extension of 50 folds
    // the 70 left into a fresh 120-second session.
    let t0 = ts(1_700_000_000);
    let mut tracker = UnlockSessionTracker::new();
    tracker.record_unlock_start(100, REASON_WORKOUT_COMPLETED, t0);

    let t1 = ts(1_700_000_030);
    tracker.extend_session(50, t1);

    assert_eq!(tracker.remaining_seconds(t1), 120);
    assert_eq!(tracker.current_session().unwrap().duration_seconds(), 120);
}
