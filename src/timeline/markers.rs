//! Marker stamp layout for the comment marker bar.
//!
//! Each distinct comment time becomes one stamp on the video's progress
//! track; several comments at the same instant share a stamp.

use std::collections::HashMap;

use super::index::fits_duration;
use crate::comments::TimeComment;

/// One stamp on the marker bar.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStamp {
    /// Comment time in seconds
    pub time: f64,
    /// Position along the bar, 0-100
    pub offset_percent: f64,
    /// Number of comments at this time
    pub count: usize,
}

impl MarkerStamp {
    /// Whether more than one comment shares this stamp.
    pub fn is_multiple(&self) -> bool {
        self.count > 1
    }
}

/// Collect marker stamps from comments.
///
/// Comments are grouped by identical time in first-seen order. Times past a
/// finite `duration` are skipped. With an unknown or zero duration every
/// stamp sits at offset 0.
///
/// # Arguments
/// * `comments` - Comments of the current video
/// * `duration` - Video duration in seconds
///
/// # Returns
/// One `MarkerStamp` per distinct time
pub fn collect_marker_stamps(comments: &[TimeComment], duration: f64) -> Vec<MarkerStamp> {
    let mut stamps: Vec<MarkerStamp> = Vec::new();
    let mut by_time: HashMap<u64, usize> = HashMap::new();

    for comment in comments {
        if !fits_duration(comment.time, duration) {
            continue;
        }
        // -0.0 and 0.0 are the same instant
        let key = (comment.time + 0.0).to_bits();
        match by_time.get(&key) {
            Some(&idx) => stamps[idx].count += 1,
            None => {
                by_time.insert(key, stamps.len());
                stamps.push(MarkerStamp {
                    time: comment.time,
                    offset_percent: offset_percent(comment.time, duration),
                    count: 1,
                });
            }
        }
    }

    stamps
}

fn offset_percent(time: f64, duration: f64) -> f64 {
    if duration.is_finite() && duration > 0.0 {
        time / duration * 100.0
    } else {
        0.0
    }
}
