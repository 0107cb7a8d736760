//! Terminal rendering of the marker bar.
//!
//! Draws the video's progress track with the playhead and one glyph per
//! marker stamp.

use std::io::Write;

use anyhow::Result;

use super::markers::MarkerStamp;
use crate::overlay::presenter::format_hms;

const TRACK: char = '─';
const PLAYHEAD: char = '⏺';
const STAMP: char = '◆';
const STAMP_MULTIPLE: char = '◈';

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const WHITE: &str = "\x1b[97m";
const DARK_GREY: &str = "\x1b[90m";
const GREY: &str = "\x1b[37m";
const RESET: &str = "\x1b[0m";

/// Build the marker bar character array.
///
/// # Arguments
/// * `bar_width` - Width of the bar in characters
/// * `current_time` - Playhead position in seconds
/// * `total_duration` - Video duration in seconds
/// * `stamps` - Marker stamps to draw
///
/// # Returns
/// A tuple of (bar_chars, filled_count) where filled_count is the number
/// of positions before the playhead.
pub fn build_marker_bar_chars(
    bar_width: usize,
    current_time: f64,
    total_duration: f64,
    stamps: &[MarkerStamp],
) -> (Vec<char>, usize) {
    let progress = if total_duration > 0.0 {
        (current_time / total_duration).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let filled = (bar_width as f64 * progress) as usize;

    let mut bar: Vec<char> = vec![TRACK; bar_width];

    if filled < bar_width {
        bar[filled] = PLAYHEAD;
    }

    for stamp in stamps {
        let pos = ((stamp.offset_percent / 100.0) * bar_width as f64) as usize;
        // A stamp at the very end still gets drawn in the last cell
        let pos = pos.min(bar_width.saturating_sub(1));
        if pos < bar_width && bar[pos] != PLAYHEAD {
            bar[pos] = match (bar[pos], stamp.is_multiple()) {
                (STAMP, _) | (STAMP_MULTIPLE, _) | (_, true) => STAMP_MULTIPLE,
                _ => STAMP,
            };
        }
    }

    (bar, filled)
}

/// Format one marker bar line, optionally with ANSI colors.
pub fn format_marker_bar(
    width: u16,
    current_time: f64,
    total_duration: f64,
    stamps: &[MarkerStamp],
    color: bool,
) -> String {
    let time_display = format!(" {}/{}", format_hms(current_time), format_hms(total_duration));
    let bar_width = (width as usize).saturating_sub(time_display.chars().count() + 1);
    let (bar, filled) = build_marker_bar_chars(bar_width, current_time, total_duration, stamps);

    let mut output = String::with_capacity(width as usize * 4);
    output.push(' ');

    if !color {
        for (i, &c) in bar.iter().enumerate() {
            output.push(if i < filled && c == TRACK { '━' } else { c });
        }
        output.push_str(&time_display);
        return output;
    }

    output.push_str(GREEN);
    for (i, &c) in bar.iter().enumerate() {
        let is_stamp = c == STAMP || c == STAMP_MULTIPLE;
        if i < filled {
            if is_stamp {
                output.push_str(YELLOW);
                output.push(c);
                output.push_str(GREEN);
            } else {
                output.push('━');
            }
        } else if i == filled {
            output.push_str(WHITE);
            output.push(c);
        } else if is_stamp {
            output.push_str(YELLOW);
            output.push(c);
        } else {
            output.push_str(DARK_GREY);
            output.push(c);
        }
    }

    output.push_str(GREY);
    output.push_str(&time_display);
    output.push_str(RESET);
    output
}

/// Write the marker bar as a single line.
pub fn render_marker_bar<W: Write>(
    out: &mut W,
    width: u16,
    current_time: f64,
    total_duration: f64,
    stamps: &[MarkerStamp],
    color: bool,
) -> Result<()> {
    let line = format_marker_bar(width, current_time, total_duration, stamps, color);
    writeln!(out, "{}", line)?;
    Ok(())
}
