//! Playback monitor.
//!
//! Listens to the video's playback-position signal, filters paused and
//! jittery ticks, and feeds due comments into the overlay scheduler.

use std::time::Instant;

use crate::config::PlaybackConfig;
use crate::overlay::{OverlayScheduler, OverlaySurface};
use crate::session::{ListenerId, PageHost};
use crate::timeline::TimeIndex;

/// One playback-position signal from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackTick {
    /// Current position in seconds
    pub position: f64,
    pub paused: bool,
    /// Video duration in seconds; NaN when unknown
    pub duration: f64,
}

impl PlaybackTick {
    pub fn playing(position: f64, duration: f64) -> Self {
        Self {
            position,
            paused: false,
            duration,
        }
    }

    pub fn paused(position: f64, duration: f64) -> Self {
        Self {
            position,
            paused: true,
            duration,
        }
    }
}

/// Bridges playback ticks to the time index and scheduler.
#[derive(Debug, Clone)]
pub struct PlaybackMonitor {
    config: PlaybackConfig,
    listener: Option<ListenerId>,
    last_position: f64,
}

impl PlaybackMonitor {
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            config,
            listener: None,
            last_position: 0.0,
        }
    }

    /// Install the position listener, replacing any previous one.
    ///
    /// Does nothing when the page has no video.
    pub fn attach<H: PageHost + ?Sized>(&mut self, host: &mut H) {
        if !host.has_video() {
            tracing::debug!("no video element; monitor not attached");
            return;
        }
        self.detach(host);
        self.listener = Some(host.attach_position_listener());
    }

    /// Remove the position listener, if installed.
    pub fn detach<H: PageHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(id) = self.listener.take() {
            host.detach_position_listener(id);
        }
    }

    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    pub fn last_position(&self) -> f64 {
        self.last_position
    }

    /// Handle a playback tick.
    ///
    /// Returns the number of comments offered to the scheduler.
    pub fn on_tick<S: OverlaySurface>(
        &mut self,
        tick: PlaybackTick,
        index: &TimeIndex,
        scheduler: &mut OverlayScheduler<S>,
        now: Instant,
    ) -> usize {
        if !self.is_attached() {
            return 0;
        }

        let moved = (tick.position - self.last_position).abs();
        if tick.paused || moved < self.config.jitter_secs {
            self.last_position = tick.position;
            return 0;
        }

        let due = index.due_at(tick.position, self.config.tolerance_secs, |key| {
            scheduler.is_tracked(key)
        });
        let offered = due.len();
        for comment in due {
            scheduler.admit(comment, now);
        }

        self.last_position = tick.position;
        offered
    }

    /// Forget the last position. The listener is left alone.
    pub fn reset(&mut self) {
        self.last_position = 0.0;
    }
}
