//! Live comment overlays.
//!
//! # Architecture
//!
//! - `presenter/`: card content, timestamp spans, activation and seeking
//! - `scheduler`: `OverlayScheduler`, admission, queueing and expiry
//! - `state`: overlay ids, phases, slots and admission results
//! - `surface`: the `OverlaySurface` trait implemented by hosts
//! - `timers`: cancellable one-shot timers on an external clock

pub mod presenter;
mod scheduler;
mod state;
mod surface;
mod timers;

pub use presenter::{Activation, ActivationTarget, Key, OverlayCard, TextSegment};
pub use scheduler::{OverlayScheduler, SchedulerStats};
pub use state::{ActiveOverlay, Admission, OverlayId, OverlayPhase, Slot};
pub use surface::{OverlaySurface, Transition};
pub use timers::{TimerHandle, TimerQueue};
