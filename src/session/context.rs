//! Per-video session state.

use crate::config::Config;
use crate::monitor::PlaybackMonitor;
use crate::overlay::{OverlayScheduler, OverlaySurface};
use crate::timeline::TimeIndex;

/// Everything tied to the video currently on the page.
///
/// Owned by the `SessionController`. `reset` is the only way it is
/// cleared; there is no partial invalidation.
pub struct Session<S: OverlaySurface> {
    /// Video whose comments are committed, if any
    pub(crate) video_id: Option<String>,
    pub(crate) index: TimeIndex,
    pub(crate) scheduler: OverlayScheduler<S>,
    pub(crate) monitor: PlaybackMonitor,
    pub(crate) bar_drawn: bool,
}

impl<S: OverlaySurface> Session<S> {
    pub fn new(config: &Config, surface: S) -> Self {
        Self {
            video_id: None,
            index: TimeIndex::new(),
            scheduler: OverlayScheduler::new(config.overlay.clone(), surface),
            monitor: PlaybackMonitor::new(config.playback.clone()),
            bar_drawn: false,
        }
    }

    /// Clear the index, overlays, queue, timers and last position at once.
    ///
    /// Host-side resources (marker bar, position listener) are released by
    /// the controller before calling this.
    pub fn reset(&mut self) {
        self.video_id = None;
        self.index.clear();
        self.scheduler.reset();
        self.monitor.reset();
        self.bar_drawn = false;
    }

    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }

    pub fn index(&self) -> &TimeIndex {
        &self.index
    }

    pub fn scheduler(&self) -> &OverlayScheduler<S> {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut OverlayScheduler<S> {
        &mut self.scheduler
    }

    pub fn monitor(&self) -> &PlaybackMonitor {
        &self.monitor
    }

    pub fn is_bar_drawn(&self) -> bool {
        self.bar_drawn
    }
}
