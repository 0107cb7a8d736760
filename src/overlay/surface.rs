//! OverlaySurface trait: where live overlays are drawn.

use super::presenter::OverlayCard;
use super::state::{OverlayId, Slot};

/// Animation a surface should start for an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Slide/fade in after mount
    Enter,
    /// Reverse transition before unmount
    Exit,
}

/// The overlay stacking container anchored near the video.
///
/// The scheduler creates the container lazily before the first mount and
/// removes it as a unit on reset. Implementations must tolerate `unmount`
/// of an element that is already gone.
pub trait OverlaySurface {
    /// Create the stacking container.
    fn create_container(&mut self);

    /// Remove the container and everything still mounted in it.
    fn remove_container(&mut self);

    /// Add an overlay element for `card` at `slot`.
    fn mount(&mut self, id: OverlayId, card: &OverlayCard, slot: Slot);

    /// Start an animation on a mounted overlay.
    fn transition(&mut self, id: OverlayId, transition: Transition);

    /// Remove an overlay element.
    fn unmount(&mut self, id: OverlayId);
}

impl<S: OverlaySurface + ?Sized> OverlaySurface for Box<S> {
    fn create_container(&mut self) {
        (**self).create_container()
    }

    fn remove_container(&mut self) {
        (**self).remove_container()
    }

    fn mount(&mut self, id: OverlayId, card: &OverlayCard, slot: Slot) {
        (**self).mount(id, card, slot)
    }

    fn transition(&mut self, id: OverlayId, transition: Transition) {
        (**self).transition(id, transition)
    }

    fn unmount(&mut self, id: OverlayId) {
        (**self).unmount(id)
    }
}
