//! Timer scheduling.
//!
//! The engine never sleeps or spawns threads. It asks an injected
//! `Scheduler` for a repeating countdown tick and one-shot turn transitions,
//! and the caller drives time forward with `QuizEngine::advance`.
//!
//! ## Example Usage
//!
//! ```
//! use trivia_engine::clock::{ManualScheduler, Scheduler, TimerKind};
//!
//! let mut scheduler = ManualScheduler::new();
//! let tick = scheduler.schedule_repeating(1000, TimerKind::Tick);
//!
//! let fired = scheduler.pop_due(2500).unwrap();
//! assert_eq!(fired.handle, tick);
//! assert_eq!(scheduler.now_ms(), 1000);
//!
//! scheduler.cancel(tick);
//! assert!(scheduler.pop_due(2500).is_none());
//! ```

mod manual;

pub use manual::ManualScheduler;

use serde::{Deserialize, Serialize};

/// Handle to a scheduled timer, used to cancel it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

impl TimerHandle {
    /// Create a new timer handle.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// What a timer means to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Per-second countdown of the live question.
    Tick,
    /// Delay between a resolved question and the next one.
    Transition,
}

/// A timer that came due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    pub kind: TimerKind,
    /// Virtual time the timer was due at.
    pub due_ms: u64,
}

/// Timer capability injected into the engine.
///
/// ## Contract
///
/// - `cancel` is synchronous: a cancelled handle never comes back from
///   `pop_due`, even if it was already due.
/// - `pop_due` returns due timers one at a time in due-time order (ties in
///   scheduling order) and moves `now_ms` to the returned timer's due time,
///   so timers scheduled while handling it are relative to that instant.
/// - Repeating timers are re-armed before being returned.
pub trait Scheduler {
    /// Current virtual time in milliseconds.
    fn now_ms(&self) -> u64;

    /// Fire `kind` every `interval_ms`, first at `now + interval_ms`.
    fn schedule_repeating(&mut self, interval_ms: u64, kind: TimerKind) -> TimerHandle;

    /// Fire `kind` once at `now + delay_ms`.
    fn schedule_once(&mut self, delay_ms: u64, kind: TimerKind) -> TimerHandle;

    /// Cancel a timer. Unknown or already finished handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);

    /// Next timer due at or before `deadline_ms`, if any.
    fn pop_due(&mut self, deadline_ms: u64) -> Option<FiredTimer>;

    /// Move the clock forward to `now_ms` (never backwards).
    fn advance_to(&mut self, now_ms: u64);

    /// Number of live timers.
    fn pending(&self) -> usize;
}
