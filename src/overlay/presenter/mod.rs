//! Overlay presenter.
//!
//! Turns a `TimeComment` into an `OverlayCard` and resolves clicks and key
//! presses on the card into seeks.

mod card;
mod stamps;

pub use card::{seek_and_play, Activation, ActivationTarget, Key, OverlayCard};
pub use stamps::{format_hms, parse_timestamp, split_timestamps, TextSegment};
