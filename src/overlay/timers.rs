//! One-shot timers driven by an external clock.
//!
//! The queue never reads the wall clock; callers pass `now` into
//! `pop_due`. A cancelled handle is gone for good; cancelling it again is
//! a no-op.

use std::collections::BTreeMap;
use std::time::Instant;

/// Handle to a scheduled timer, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle {
    deadline: Instant,
    seq: u64,
}

impl TimerHandle {
    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

/// Deadline-ordered queue of one-shot actions.
#[derive(Debug)]
pub struct TimerQueue<T> {
    entries: BTreeMap<TimerHandle, T>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Schedule `action` to fire at `deadline`.
    ///
    /// Timers with equal deadlines fire in scheduling order.
    pub fn schedule(&mut self, deadline: Instant, action: T) -> TimerHandle {
        let handle = TimerHandle {
            deadline,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.entries.insert(handle, action);
        handle
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.entries.remove(&handle).is_some()
    }

    /// Remove and return the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<(Instant, T)> {
        let handle = *self.entries.keys().next()?;
        if handle.deadline > now {
            return None;
        }
        let action = self.entries.remove(&handle)?;
        Some((handle.deadline, action))
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.keys().next().map(|h| h.deadline)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
