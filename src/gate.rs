use chrono::{DateTime, Utc};

use crate::unlock::UnlockSessionService;

/// Outcome of asking whether shielded apps may be used right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// An unlock session is active; shielded apps stay reachable.
    Allow { remaining_seconds: i64 },
    /// No active session; the shield blocks.
    Block,
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allow { .. })
    }
}

/// Decide whether the shield should stand down at `now`.
///
/// This is the single place where session state turns into a block/allow
/// answer. It is deliberately a pure function over the service: no clock,
/// no side effects, so the decision for a given state and instant is always
/// the same.
pub fn evaluate(service: &dyn UnlockSessionService, now: DateTime<Utc>) -> GateDecision {
    if service.is_active(now) {
        GateDecision::Allow {
            remaining_seconds: service.remaining_seconds(now),
        }
    } else {
        GateDecision::Block
    }
}
