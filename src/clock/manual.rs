//! Virtual-time scheduler.
//!
//! Time only moves when the caller says so, which makes every engine run
//! reproducible. Real-time drivers feed it wall-clock elapsed time instead.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use super::{FiredTimer, Scheduler, TimerHandle, TimerKind};

#[derive(Clone, Debug)]
struct TimerEntry {
    kind: TimerKind,
    /// `Some` for repeating timers.
    interval_ms: Option<u64>,
    due_ms: u64,
}

/// Scheduler over a manually advanced virtual clock.
///
/// Cancelled timers are dropped from the live table immediately; their heap
/// slots are discarded lazily when they reach the top.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    next_handle: u64,
    next_seq: u64,
    timers: FxHashMap<TimerHandle, TimerEntry>,
    queue: BinaryHeap<Reverse<(u64, u64, TimerHandle)>>,
}

impl ManualScheduler {
    /// Create a scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Is this handle still scheduled?
    #[must_use]
    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(&handle)
    }

    /// Kind of a scheduled timer.
    #[must_use]
    pub fn kind_of(&self, handle: TimerHandle) -> Option<TimerKind> {
        self.timers.get(&handle).map(|t| t.kind)
    }

    fn insert(&mut self, kind: TimerKind, interval_ms: Option<u64>, delay_ms: u64) -> TimerHandle {
        let handle = TimerHandle::new(self.next_handle);
        self.next_handle += 1;

        let due_ms = self.now_ms.saturating_add(delay_ms);
        self.timers.insert(
            handle,
            TimerEntry {
                kind,
                interval_ms,
                due_ms,
            },
        );
        self.push(due_ms, handle);
        handle
    }

    fn push(&mut self, due_ms: u64, handle: TimerHandle) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse((due_ms, seq, handle)));
    }
}

impl Scheduler for ManualScheduler {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn schedule_repeating(&mut self, interval_ms: u64, kind: TimerKind) -> TimerHandle {
        assert!(interval_ms > 0, "Repeating interval must be positive");
        self.insert(kind, Some(interval_ms), interval_ms)
    }

    fn schedule_once(&mut self, delay_ms: u64, kind: TimerKind) -> TimerHandle {
        self.insert(kind, None, delay_ms)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.remove(&handle);
    }

    fn pop_due(&mut self, deadline_ms: u64) -> Option<FiredTimer> {
        while let Some(Reverse((due_ms, _, handle))) = self.queue.peek().copied() {
            if due_ms > deadline_ms {
                return None;
            }
            self.queue.pop();

            // Cancelled, or superseded by a later re-arm.
            let Some(entry) = self.timers.get_mut(&handle) else {
                continue;
            };
            if entry.due_ms != due_ms {
                continue;
            }

            let kind = entry.kind;
            let interval = entry.interval_ms;
            if let Some(interval) = interval {
                entry.due_ms = due_ms.saturating_add(interval);
            }

            self.now_ms = self.now_ms.max(due_ms);
            match interval {
                Some(interval) => self.push(due_ms.saturating_add(interval), handle),
                None => {
                    self.timers.remove(&handle);
                }
            }

            return Some(FiredTimer { handle, kind, due_ms });
        }
        None
    }

    fn advance_to(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn pending(&self) -> usize {
        self.timers.len()
    }
}
