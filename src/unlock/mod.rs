// Unlock session model
//
// This module owns the "earned screen time" bookkeeping: a workout grants a
// timed unlock session, and everything else in the app (the shield gate, the
// notification monitor, the CLI) asks this module whether a session is
// active and how much time is left. All queries take the reference
// timestamp as an argument; nothing in here reads a clock, which keeps the
// model fully deterministic and trivially testable.

mod mock;
mod service;
mod session;
mod tracker;

pub use mock::{MockUnlockSessionService, RecordedStart};
pub use service::UnlockSessionService;
pub use session::{
    REASON_WORKOUT_COMPLETED, REASON_WORKOUT_EXTENDED, UnlockSession, derive_session_id,
};
pub use tracker::{SessionPhase, UnlockSessionTracker};
