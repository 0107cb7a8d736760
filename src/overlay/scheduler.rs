//! Overlay lifecycle scheduler.
//!
//! Owns every live overlay from admission to removal:
//!
//! ```text
//! admit ─┬─> Visible ──(display)──> FadingOut ──(fade)──> Removed
//!        └─> queue (FIFO, when at capacity) ──(slot frees)──┘
//! ```
//!
//! Admission is queued: when `max_concurrent` overlays are on the surface
//! a newly due comment waits in a FIFO queue and is displayed when an
//! overlay is removed. Overlays are never evicted early.

use std::collections::VecDeque;
use std::time::Instant;

use super::presenter::OverlayCard;
use super::state::{ActiveOverlay, Admission, OverlayId, OverlayPhase, Slot};
use super::surface::{OverlaySurface, Transition};
use super::timers::TimerQueue;
use crate::comments::{OverlayKey, TimeComment};
use crate::config::OverlayConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerAction {
    Expire(OverlayId),
    Remove(OverlayId),
}

/// Counters accumulated since the scheduler was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Overlays displayed
    pub shown: usize,
    /// Comments that had to wait in the queue
    pub queued: usize,
    /// Admissions rejected as already tracked
    pub duplicates: usize,
    /// Highest number of overlays on the surface at once
    pub peak_active: usize,
}

/// Concurrency-capped, queued overlay lifecycle.
pub struct OverlayScheduler<S: OverlaySurface> {
    config: OverlayConfig,
    surface: S,
    container_created: bool,
    active: Vec<ActiveOverlay>,
    queue: VecDeque<TimeComment>,
    timers: TimerQueue<TimerAction>,
    next_id: u64,
    stats: SchedulerStats,
}

impl<S: OverlaySurface> OverlayScheduler<S> {
    pub fn new(config: OverlayConfig, surface: S) -> Self {
        Self {
            config,
            surface,
            container_created: false,
            active: Vec::new(),
            queue: VecDeque::new(),
            timers: TimerQueue::new(),
            next_id: 1,
            stats: SchedulerStats::default(),
        }
    }

    fn capacity(&self) -> usize {
        self.config.max_concurrent.max(1)
    }

    /// Whether a comment with `key` is on screen or waiting in the queue.
    pub fn is_tracked(&self, key: &OverlayKey) -> bool {
        self.active.iter().any(|o| &o.key == key)
            || self.queue.iter().any(|c| {
                c.comment_id == key.comment_id && c.timestamp == key.timestamp
            })
    }

    /// Offer a due comment for display.
    pub fn admit(&mut self, comment: TimeComment, now: Instant) -> Admission {
        if self.is_tracked(&comment.key()) {
            self.stats.duplicates += 1;
            tracing::trace!(comment_id = %comment.comment_id, "already tracked");
            return Admission::Duplicate;
        }

        if self.active.len() >= self.capacity() {
            tracing::debug!(
                comment_id = %comment.comment_id,
                queued = self.queue.len() + 1,
                "at capacity, queueing overlay"
            );
            self.queue.push_back(comment);
            self.stats.queued += 1;
            return Admission::Queued(self.queue.len() - 1);
        }

        Admission::Shown(self.display(comment, now))
    }

    fn display(&mut self, comment: TimeComment, now: Instant) -> OverlayId {
        if !self.container_created {
            self.surface.create_container();
            self.container_created = true;
        }

        let id = OverlayId(self.next_id);
        self.next_id += 1;

        let card = OverlayCard::from_comment(&comment);
        let slot = self.free_slot();
        self.surface.mount(id, &card, slot);
        self.surface.transition(id, Transition::Enter);

        let timer = self
            .timers
            .schedule(now + self.config.display_duration(), TimerAction::Expire(id));

        tracing::debug!(overlay = %id, comment_id = %comment.comment_id, slot = slot.index, "overlay shown");
        self.active.push(ActiveOverlay {
            id,
            key: comment.key(),
            card,
            slot,
            started_at: now,
            phase: OverlayPhase::Visible,
            timer,
        });

        self.stats.shown += 1;
        self.stats.peak_active = self.stats.peak_active.max(self.active.len());
        id
    }

    /// Lowest slot not used by an active overlay, or slot 0 when all are.
    fn free_slot(&self) -> Slot {
        let index = (0..self.capacity())
            .find(|i| !self.active.iter().any(|o| o.slot.index == *i))
            .unwrap_or(0);
        Slot::new(index, &self.config)
    }

    /// Fire every timer due at or before `now`.
    ///
    /// Follow-up work runs at the firing timer's deadline rather than at
    /// `now`, so lifecycles do not stretch when `advance` is called late.
    /// Returns the number of timers fired.
    pub fn advance(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        while let Some((deadline, action)) = self.timers.pop_due(now) {
            fired += 1;
            match action {
                TimerAction::Expire(id) => self.begin_fade(id, deadline),
                TimerAction::Remove(id) => self.remove(id, deadline),
            }
        }
        fired
    }

    fn begin_fade(&mut self, id: OverlayId, at: Instant) {
        let Some(overlay) = self.active.iter_mut().find(|o| o.id == id) else {
            tracing::trace!(overlay = %id, "expiry for unknown overlay ignored");
            return;
        };

        overlay.phase = OverlayPhase::FadingOut;
        overlay.timer = self
            .timers
            .schedule(at + self.config.fade_duration(), TimerAction::Remove(id));
        self.surface.transition(id, Transition::Exit);
    }

    fn remove(&mut self, id: OverlayId, at: Instant) {
        let Some(pos) = self.active.iter().position(|o| o.id == id) else {
            tracing::trace!(overlay = %id, "removal for unknown overlay ignored");
            return;
        };

        self.active.remove(pos);
        self.surface.unmount(id);
        tracing::debug!(overlay = %id, "overlay removed");
        self.drain_queue(at);
    }

    fn drain_queue(&mut self, now: Instant) {
        while self.active.len() < self.capacity() {
            let Some(next) = self.queue.pop_front() else {
                break;
            };
            self.display(next, now);
        }
    }

    /// Drop every overlay, queued comment and pending timer, and remove
    /// the container. Nothing scheduled before the reset can fire after it.
    ///
    /// Each active overlay owns exactly one pending timer (its expiry, or
    /// its removal once fading), so cancelling those empties the queue.
    pub fn reset(&mut self) {
        let mut cancelled = 0;
        for overlay in self.active.drain(..) {
            if self.timers.cancel(overlay.timer) {
                cancelled += 1;
            }
            self.surface.unmount(overlay.id);
        }
        self.queue.clear();
        if self.container_created {
            self.surface.remove_container();
            self.container_created = false;
        }
        tracing::debug!(cancelled_timers = cancelled, "overlay scheduler reset");
    }

    pub fn active(&self) -> &[ActiveOverlay] {
        &self.active
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn visible_count(&self) -> usize {
        self.active.iter().filter(|o| o.is_visible()).count()
    }

    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// When the next lifecycle timer is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn card(&self, id: OverlayId) -> Option<&OverlayCard> {
        self.active.iter().find(|o| o.id == id).map(|o| &o.card)
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
