//! The comment timeline of the current video.
//!
//! - `index`: `TimeIndex`, the due-comment lookup
//! - `markers`: marker stamp layout for the progress track
//! - `progress`: terminal rendering of the marker bar

mod index;
mod markers;
mod progress;

pub use index::TimeIndex;
pub use markers::{collect_marker_stamps, MarkerStamp};
pub use progress::{build_marker_bar_chars, format_marker_bar, render_marker_bar};
