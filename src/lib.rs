//! ytstamps - time-anchored comment overlays for video playback
//!
//! Shows where comments reference moments of a video (the marker bar) and
//! pops up a short-lived overlay when playback reaches a commented moment.
//! The page itself is abstracted behind traits so the same session logic
//! runs against a browser binding, the replay simulator, or tests.
//!
//! # Module Structure
//!
//! - [`comments`] - comment records, providers and off-thread fetching
//! - [`timeline`] - due-comment index and marker bar layout/rendering
//! - [`overlay`] - the overlay scheduler, presenter and surface trait
//! - [`monitor`] - playback tick filtering
//! - [`session`] - per-video session lifecycle and host traits
//! - [`replay`] - deterministic replay over a simulated page
//! - [`config`] - TOML configuration

pub mod cli;
pub mod comments;
pub mod config;
pub mod monitor;
pub mod overlay;
pub mod replay;
pub mod session;
pub mod timeline;

pub use comments::{RawTimeComment, TimeComment};
pub use config::Config;
pub use monitor::{PlaybackMonitor, PlaybackTick};
pub use overlay::{OverlayScheduler, OverlaySurface};
pub use session::{PageHost, PlaybackControl, SessionController};
pub use timeline::TimeIndex;
