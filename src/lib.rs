//! Fitlock trades workouts for screen time.
//!
//! The model is a single [`unlock::UnlockSession`]: completing a workout
//! grants one, the shield [`gate`] allows blocked apps while it is active,
//! and the [`monitor`] watches for shield notifications so a blocked app
//! launch can point the user back to their next workout.
//!
//! Everything time-related takes the reference timestamp as an argument.
//! The session model never reads a clock itself; the host layer reads the
//! wall clock once per command or poll, so the model is deterministic
//! under test:
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use fitlock::unlock::{REASON_WORKOUT_COMPLETED, UnlockSessionTracker};
//!
//! let t0 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
//! let mut tracker = UnlockSessionTracker::new();
//! tracker.record_unlock_start(1800, REASON_WORKOUT_COMPLETED, t0);
//!
//! let later = t0 + chrono::Duration::minutes(10);
//! assert!(tracker.is_active(later));
//! assert_eq!(tracker.remaining_seconds(later), 1200);
//! ```

pub mod config;
pub mod gate;
pub mod monitor;
pub mod platform;
pub mod state;
pub mod unlock;
