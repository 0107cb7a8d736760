//! Overlay state types
//!
//! Shared types for the overlay scheduler: overlay identity, phases,
//! display slots and the per-overlay record.

use std::fmt;
use std::time::{Duration, Instant};

use super::presenter::OverlayCard;
use super::timers::TimerHandle;
use crate::comments::OverlayKey;
use crate::config::OverlayConfig;

/// Identifier of a mounted overlay. Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverlayId(pub u64);

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle phase of an overlay that is still on the surface.
///
/// `Pending` lives in the queue as a plain comment and `Removed` overlays
/// are dropped, so only the two on-screen phases are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPhase {
    Visible,
    FadingOut,
}

/// Vertical position assigned to an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Slot index in `0..max_concurrent`
    pub index: usize,
    /// Offset from the top of the container, in pixels
    pub offset_px: u32,
}

impl Slot {
    pub fn new(index: usize, config: &OverlayConfig) -> Self {
        Self {
            index,
            offset_px: config.base_offset_px + index as u32 * config.slot_spacing_px,
        }
    }
}

/// Result of offering a due comment to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Displayed immediately
    Shown(OverlayId),
    /// Appended to the queue at this position (0 = next)
    Queued(usize),
    /// Same key already on screen or queued; ignored
    Duplicate,
}

/// An overlay currently on the surface.
#[derive(Debug, Clone)]
pub struct ActiveOverlay {
    pub id: OverlayId,
    pub key: OverlayKey,
    pub card: OverlayCard,
    pub slot: Slot,
    /// When it was displayed
    pub started_at: Instant,
    pub phase: OverlayPhase,
    /// The pending expiry or removal timer
    pub(crate) timer: TimerHandle,
}

impl ActiveOverlay {
    /// Time spent on screen as of `now`.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    pub fn is_visible(&self) -> bool {
        self.phase == OverlayPhase::Visible
    }
}
