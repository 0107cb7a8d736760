//! Overlay card content and activation.

use super::stamps::{format_hms, split_timestamps, TextSegment};
use crate::comments::TimeComment;
use crate::session::PlaybackControl;

const FALLBACK_AUTHOR: &str = "Unknown";
const FALLBACK_AVATAR_ALT: &str = "User";

/// Everything a surface needs to draw one live overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayCard {
    pub comment_id: String,
    /// Avatar image URL, empty when the comment has none
    pub avatar_url: String,
    pub avatar_alt: String,
    pub author: String,
    /// Anchor time shown on the card
    pub display_time: String,
    pub segments: Vec<TextSegment>,
    /// Where clicking the card seeks to
    pub seek_target: f64,
}

/// Part of a card that received an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationTarget {
    /// The card body
    Overlay,
    /// A timestamp span, by index into `OverlayCard::segments`
    Stamp(usize),
}

/// Keys that may reach a focused card element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Other,
}

/// A user interaction with a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Click(ActivationTarget),
    Key(ActivationTarget, Key),
}

impl OverlayCard {
    pub fn from_comment(comment: &TimeComment) -> Self {
        let author = comment
            .author_name
            .clone()
            .filter(|name| !name.is_empty());

        Self {
            comment_id: comment.comment_id.clone(),
            avatar_url: comment.author_avatar.clone().unwrap_or_default(),
            avatar_alt: author
                .clone()
                .unwrap_or_else(|| FALLBACK_AVATAR_ALT.to_string()),
            author: author.unwrap_or_else(|| FALLBACK_AUTHOR.to_string()),
            display_time: comment
                .timestamp
                .clone()
                .unwrap_or_else(|| format_hms(comment.time)),
            segments: split_timestamps(comment.text.as_deref().unwrap_or_default()),
            seek_target: comment.time,
        }
    }

    /// Body text with stamps flattened back in.
    pub fn text(&self) -> String {
        self.segments.iter().map(TextSegment::text).collect()
    }

    /// Indices of the activatable timestamp spans.
    pub fn stamp_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.segments
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_stamp())
            .map(|(i, _)| i)
    }

    /// Resolve an activation into a seek target, if it produces one.
    ///
    /// A stamp consumes its own activation, so activating a stamp never
    /// also seeks to the card's anchor.
    pub fn target_for(&self, activation: Activation) -> Option<f64> {
        match activation {
            Activation::Click(ActivationTarget::Overlay) => Some(self.seek_target),
            Activation::Click(ActivationTarget::Stamp(idx))
            | Activation::Key(ActivationTarget::Stamp(idx), Key::Enter | Key::Space) => {
                match self.segments.get(idx)? {
                    TextSegment::Stamp { seconds, .. } => seconds.map(|s| s as f64),
                    TextSegment::Plain(_) => None,
                }
            }
            Activation::Key(_, _) => None,
        }
    }

    /// Handle an activation: seek the player and resume playback.
    ///
    /// Returns the clamped position that was sought to.
    pub fn activate<P: PlaybackControl + ?Sized>(
        &self,
        activation: Activation,
        player: &mut P,
    ) -> Option<f64> {
        let target = self.target_for(activation)?;
        Some(seek_and_play(player, target))
    }
}

/// Clamp `seconds` into the video, seek, and resume. Resume failures are
/// ignored.
pub fn seek_and_play<P: PlaybackControl + ?Sized>(player: &mut P, seconds: f64) -> f64 {
    let duration = player.duration();
    let upper = if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        f64::INFINITY
    };
    let target = seconds.max(0.0).min(upper);

    player.seek(target);
    if let Err(e) = player.resume() {
        tracing::debug!(error = %e, "resume after seek failed");
    }
    target
}
