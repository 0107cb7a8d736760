//! Session controller.
//!
//! Orchestrates one session per video: resolve the video id, fetch its
//! comments, commit them if still relevant, wire the playback monitor, and
//! tear everything down when the page navigates.

use std::time::Instant;

use super::context::Session;
use super::host::PageHost;
use super::navigation::NavigationWatcher;
use super::video_id::video_id_from_url;
use crate::comments::{CommentSource, FetchResult, FetchTicket};
use crate::config::Config;
use crate::monitor::PlaybackTick;
use crate::overlay::{Activation, OverlayId, OverlaySurface};
use crate::timeline::collect_marker_stamps;

/// Drives a `Session` from host events.
pub struct SessionController<H, S, F>
where
    H: PageHost,
    S: OverlaySurface,
    F: CommentSource,
{
    host: H,
    source: F,
    session: Session<S>,
    navigation: NavigationWatcher,
    /// Bumped on every fetch; results from older generations are stale
    generation: u64,
}

impl<H, S, F> SessionController<H, S, F>
where
    H: PageHost,
    S: OverlaySurface,
    F: CommentSource,
{
    pub fn new(config: &Config, host: H, surface: S, source: F) -> Self {
        let navigation = NavigationWatcher::new(host.location());
        Self {
            host,
            source,
            session: Session::new(config, surface),
            navigation,
            generation: 0,
        }
    }

    /// Start a session for the page's current video.
    ///
    /// Pages without a video id are left alone.
    pub fn start(&mut self) {
        let Some(video_id) = video_id_from_url(&self.host.location()) else {
            tracing::debug!("no video on this page");
            return;
        };

        self.generation += 1;
        tracing::debug!(%video_id, generation = self.generation, "requesting comments");
        self.source.request(FetchTicket {
            video_id,
            generation: self.generation,
        });
    }

    /// Apply a completed fetch. Returns true if it was committed.
    ///
    /// Results are discarded when a newer fetch has been issued or the page
    /// no longer shows the video they were fetched for.
    pub fn on_fetch_resolved(&mut self, result: FetchResult) -> bool {
        let FetchResult { ticket, comments } = result;
        let current = video_id_from_url(&self.host.location());

        let is_current = ticket.generation == self.generation
            && current.as_deref() == Some(ticket.video_id.as_str());
        if !is_current {
            tracing::debug!(
                video_id = %ticket.video_id,
                generation = ticket.generation,
                current_generation = self.generation,
                "discarding stale comments"
            );
            return false;
        }

        let duration = self.host.duration();
        let kept = self.session.index.load(comments, duration);
        let stamps = collect_marker_stamps(self.session.index.comments(), duration);
        self.host.draw_marker_bar(&stamps);
        self.session.bar_drawn = true;
        self.session.monitor.attach(&mut self.host);
        self.session.video_id = Some(ticket.video_id);

        tracing::info!(
            video_id = ?self.session.video_id,
            comments = kept,
            stamps = stamps.len(),
            "session started"
        );
        true
    }

    /// Apply every fetch the source has completed. Returns how many were
    /// committed.
    pub fn poll_fetches(&mut self) -> usize {
        let mut committed = 0;
        for result in self.source.poll() {
            if self.on_fetch_resolved(result) {
                committed += 1;
            }
        }
        committed
    }

    /// Remove everything the session put on the page and clear its state.
    pub fn teardown(&mut self) {
        if self.session.bar_drawn {
            self.host.remove_marker_bar();
        }
        self.session.monitor.detach(&mut self.host);
        self.session.reset();
    }

    /// The page now shows a different video: tear down and start over.
    pub fn on_navigation(&mut self) {
        let location = self.host.location();
        tracing::debug!(%location, "navigation");
        self.navigation.observe(&location);
        self.teardown();
        self.start();
    }

    /// Compare the host's address with the last one seen and handle a
    /// change as navigation. Returns true if it navigated.
    pub fn check_navigation(&mut self) -> bool {
        let location = self.host.location();
        if self.navigation.observe(&location) {
            self.on_navigation();
            true
        } else {
            false
        }
    }

    /// Forward a playback tick to the monitor.
    pub fn on_playback(&mut self, tick: PlaybackTick, now: Instant) -> usize {
        let Session {
            index,
            scheduler,
            monitor,
            ..
        } = &mut self.session;
        monitor.on_tick(tick, index, scheduler, now)
    }

    /// Fire overlay timers due at `now`.
    pub fn advance(&mut self, now: Instant) -> usize {
        self.session.scheduler.advance(now)
    }

    /// Activate an overlay (or one of its timestamps). Returns the position
    /// sought to. Does not affect the overlay's expiry.
    pub fn activate(&mut self, id: OverlayId, activation: Activation) -> Option<f64> {
        let card = self.session.scheduler.card(id)?;
        card.activate(activation, &mut self.host)
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The overlay surface, for hosts that need to adjust it between events.
    pub fn surface_mut(&mut self) -> &mut S {
        self.session.scheduler.surface_mut()
    }

    pub fn source_mut(&mut self) -> &mut F {
        &mut self.source
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
