//! Deterministic playback replay.
//!
//! Drives a `SessionController` over a simulated page and a virtual clock:
//! the playhead advances by a fixed step per tick, overlay timers fire at
//! their exact deadlines, and every overlay event is written as a line of
//! text. Used by the `replay` command and by integration tests.

mod page;
mod surface;

pub use page::SimulatedPage;
pub use surface::{truncate_to_width, TextSurface};

use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};

use crate::comments::{CommentProvider, ThreadedSource};
use crate::config::Config;
use crate::monitor::PlaybackTick;
use crate::overlay::SchedulerStats;
use crate::session::SessionController;

/// How long a replay waits for the provider before playing without comments.
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// A mid-replay navigation to another video.
#[derive(Debug, Clone)]
pub struct ReplayNavigation {
    /// Playhead position of the first video at which to navigate
    pub at: f64,
    pub url: String,
    pub duration: f64,
}

/// Replay parameters.
#[derive(Debug, Clone)]
pub struct ReplayOptions {
    pub url: String,
    /// Video duration in seconds
    pub duration: f64,
    /// First playhead position
    pub start: f64,
    /// Last playhead position; defaults to the duration
    pub end: Option<f64>,
    /// Virtual time between playback ticks
    pub step: Duration,
    /// Sleep for `step` between ticks
    pub realtime: bool,
    /// Width available for comment text in output lines
    pub text_width: usize,
    pub navigation: Option<ReplayNavigation>,
    pub config: Config,
}

impl ReplayOptions {
    pub fn new(url: impl Into<String>, duration: f64) -> Self {
        Self {
            url: url.into(),
            duration,
            start: 0.0,
            end: None,
            step: Duration::from_millis(250),
            realtime: false,
            text_width: 60,
            navigation: None,
            config: Config::default(),
        }
    }
}

/// What happened during a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Comments committed to the index of the last video
    pub comments_loaded: usize,
    pub stats: SchedulerStats,
    pub navigated: bool,
    /// True when the replay was stopped early
    pub interrupted: bool,
}

type Controller<W> = SessionController<SimulatedPage, TextSurface<W>, ThreadedSource>;

/// Run a replay, writing overlay events to `out`.
///
/// `should_stop` is polled once per tick.
pub fn run<P, W>(
    options: &ReplayOptions,
    provider: P,
    out: W,
    should_stop: impl Fn() -> bool,
) -> Result<ReplaySummary>
where
    P: CommentProvider + 'static,
    W: Write,
{
    if options.step.is_zero() {
        bail!("replay step must be greater than zero");
    }
    if !options.duration.is_finite() || options.duration <= 0.0 {
        bail!("video duration must be a positive number of seconds");
    }

    let origin = Instant::now();
    let mut page = SimulatedPage::new(&options.url, options.duration);
    page.position = options.start;
    let surface = TextSurface::new(out, origin, options.text_width);
    let source = ThreadedSource::spawn(provider);
    let mut controller = SessionController::new(&options.config, page, surface, source);

    controller.start();
    await_first_fetch(&mut controller);

    let mut clock = origin;
    let mut position = options.start;
    let mut end = options.end.unwrap_or(options.duration).min(options.duration);
    let mut duration = options.duration;
    let mut navigated = false;
    let mut interrupted = false;

    while position <= end {
        if should_stop() {
            interrupted = true;
            break;
        }

        fire_due_timers(&mut controller, clock);
        controller.poll_fetches();

        if let Some(nav) = options.navigation.as_ref().filter(|_| !navigated) {
            if position >= nav.at {
                navigated = true;
                controller.host_mut().navigate(&nav.url, nav.duration);
                controller.check_navigation();
                await_first_fetch(&mut controller);
                position = 0.0;
                duration = nav.duration;
                end = nav.duration;
            }
        }

        controller.host_mut().position = position;
        controller.surface_mut().set_clock(clock);
        controller.on_playback(PlaybackTick::playing(position, duration), clock);

        if options.realtime {
            thread::sleep(options.step);
        }
        clock += options.step;
        position += options.step.as_secs_f64();
    }

    // Let the overlays still on screen run out
    if !interrupted {
        while let Some(deadline) = controller.session().scheduler().next_deadline() {
            fire_due_timers(&mut controller, deadline);
        }
    }

    Ok(ReplaySummary {
        comments_loaded: controller.session().index().len(),
        stats: controller.session().scheduler().stats(),
        navigated,
        interrupted,
    })
}

/// Fire timers one deadline at a time so output lines carry exact times.
fn fire_due_timers<W: Write>(controller: &mut Controller<W>, now: Instant) {
    while let Some(deadline) = controller
        .session()
        .scheduler()
        .next_deadline()
        .filter(|d| *d <= now)
    {
        controller.surface_mut().set_clock(deadline);
        controller.advance(deadline);
    }
}

fn await_first_fetch<W: Write>(controller: &mut Controller<W>) {
    match controller.source_mut().wait(FETCH_TIMEOUT) {
        Some(result) => {
            controller.on_fetch_resolved(result);
        }
        None => tracing::warn!("comment fetch timed out; replaying without comments"),
    }
}
