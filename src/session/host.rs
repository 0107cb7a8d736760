//! Traits for the page the session runs inside.

use crate::timeline::MarkerStamp;

/// Errors from playback commands.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaybackError {
    #[error("No video element on the page")]
    NoVideo,

    #[error("Playback could not be resumed: {0}")]
    ResumeRejected(String),
}

/// Seek and resume commands on the current video.
pub trait PlaybackControl {
    /// Video duration in seconds; NaN when unknown.
    fn duration(&self) -> f64;

    /// Move the playhead to `seconds`.
    fn seek(&mut self, seconds: f64);

    /// Resume playback. Callers treat failures as non-fatal.
    fn resume(&mut self) -> Result<(), PlaybackError>;
}

/// Handle of an installed playback-position listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// The host page: address, video element, listeners and marker bar.
pub trait PageHost: PlaybackControl {
    /// Current page address.
    fn location(&self) -> String;

    /// Whether the page currently has a video element.
    fn has_video(&self) -> bool;

    /// Install a playback-position listener on the video.
    fn attach_position_listener(&mut self) -> ListenerId;

    /// Remove a listener installed by `attach_position_listener`.
    fn detach_position_listener(&mut self, id: ListenerId);

    /// Draw (or redraw) the marker bar on the progress track.
    fn draw_marker_bar(&mut self, stamps: &[MarkerStamp]);

    /// Remove the marker bar, if present.
    fn remove_marker_bar(&mut self);
}
