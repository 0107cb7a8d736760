//! Session lifecycle.
//!
//! - `host`: traits the page implements (`PageHost`, `PlaybackControl`)
//! - `context`: `Session`, the per-video state and its reset
//! - `controller`: `SessionController`, startup, fetch commit, navigation
//! - `navigation`: address-change detection
//! - `video_id`: video id extraction from page addresses

mod context;
mod controller;
mod host;
mod navigation;
mod video_id;

pub use context::Session;
pub use controller::SessionController;
pub use host::{ListenerId, PageHost, PlaybackControl, PlaybackError};
pub use navigation::NavigationWatcher;
pub use video_id::video_id_from_url;
