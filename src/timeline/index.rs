//! Time index of the current video's comments.

use crate::comments::{OverlayKey, TimeComment};

/// The comments of one video, answering "which comments are due now".
#[derive(Debug, Clone, Default)]
pub struct TimeIndex {
    comments: Vec<TimeComment>,
}

impl TimeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole comment set.
    ///
    /// Comments past a finite `duration` are dropped. With an unknown
    /// duration (NaN or infinite) every comment is kept.
    ///
    /// Returns the number of comments kept.
    pub fn load(&mut self, comments: Vec<TimeComment>, duration: f64) -> usize {
        let total = comments.len();
        self.comments = comments
            .into_iter()
            .filter(|c| fits_duration(c.time, duration))
            .collect();

        let dropped = total - self.comments.len();
        if dropped > 0 {
            tracing::debug!(dropped, duration, "dropped comments past the end of the video");
        }
        self.comments.len()
    }

    /// Comments within `tolerance` seconds of `current_time` whose key is
    /// not already tracked, in load order.
    pub fn due_at<F>(&self, current_time: f64, tolerance: f64, is_tracked: F) -> Vec<TimeComment>
    where
        F: Fn(&OverlayKey) -> bool,
    {
        self.comments
            .iter()
            .filter(|c| (c.time - current_time).abs() <= tolerance)
            .filter(|c| !is_tracked(&c.key()))
            .cloned()
            .collect()
    }

    pub fn clear(&mut self) {
        self.comments.clear();
    }

    pub fn comments(&self) -> &[TimeComment] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

/// Whether a comment at `time` can be placed on a video of `duration`.
pub(crate) fn fits_duration(time: f64, duration: f64) -> bool {
    time.is_finite() && !(duration.is_finite() && time > duration)
}
