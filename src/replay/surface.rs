//! Text overlay surface: one line per lifecycle event.

use std::io::Write;
use std::time::Instant;

use unicode_width::UnicodeWidthChar;

use crate::overlay::presenter::format_hms;
use crate::overlay::{OverlayCard, OverlayId, OverlaySurface, Slot, Transition};

const ELLIPSIS: char = '…';

/// Writes overlay lifecycle events as timestamped lines.
///
/// Lines are prefixed with the virtual clock time set through `set_clock`.
/// Write errors are ignored: the surface is a display, not a log of record.
pub struct TextSurface<W: Write> {
    out: W,
    origin: Instant,
    clock: Instant,
    /// Maximum display width of comment text
    text_width: usize,
    mounted: usize,
}

impl<W: Write> TextSurface<W> {
    pub fn new(out: W, origin: Instant, text_width: usize) -> Self {
        Self {
            out,
            origin,
            clock: origin,
            text_width,
            mounted: 0,
        }
    }

    /// Set the time used for the next lines.
    pub fn set_clock(&mut self, now: Instant) {
        self.clock = now;
    }

    /// Number of overlays currently mounted.
    pub fn mounted(&self) -> usize {
        self.mounted
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, message: &str) {
        let elapsed = self.clock.saturating_duration_since(self.origin);
        let _ = writeln!(
            self.out,
            "[{}.{:03}] {}",
            format_hms(elapsed.as_secs_f64()),
            elapsed.subsec_millis(),
            message
        );
    }
}

impl<W: Write> OverlaySurface for TextSurface<W> {
    fn create_container(&mut self) {
        self.line("overlay container created");
    }

    fn remove_container(&mut self) {
        self.mounted = 0;
        self.line("overlay container removed");
    }

    fn mount(&mut self, id: OverlayId, card: &OverlayCard, slot: Slot) {
        self.mounted += 1;
        let text = truncate_to_width(&card.text(), self.text_width);
        self.line(&format!(
            "show {} slot {} @{} [{}] {}",
            id, slot.index, card.author, card.display_time, text
        ));
    }

    fn transition(&mut self, id: OverlayId, transition: Transition) {
        if transition == Transition::Exit {
            self.line(&format!("fade {}", id));
        }
    }

    fn unmount(&mut self, id: OverlayId) {
        self.mounted = self.mounted.saturating_sub(1);
        self.line(&format!("hide {}", id));
    }
}

/// Cut `text` to at most `width` columns, ending with an ellipsis when cut.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let text = text.replace(['\n', '\r'], " ");
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        return text;
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}
