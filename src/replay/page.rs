//! In-memory page used for replays and tests.

use crate::session::{ListenerId, PageHost, PlaybackControl, PlaybackError};
use crate::timeline::MarkerStamp;

/// A simulated video page.
///
/// Tracks exactly what a session does to the page: installed listeners,
/// seeks, resume calls and the marker bar.
#[derive(Debug, Clone)]
pub struct SimulatedPage {
    location: String,
    /// None when the page has no video element
    duration: Option<f64>,
    pub position: f64,
    pub paused: bool,
    /// Reject resume calls (autoplay blocked)
    pub block_resume: bool,
    next_listener: u64,
    listeners: Vec<ListenerId>,
    seeks: Vec<f64>,
    resumes: usize,
    marker_bar: Option<Vec<MarkerStamp>>,
}

impl SimulatedPage {
    pub fn new(location: impl Into<String>, duration: f64) -> Self {
        Self {
            location: location.into(),
            duration: Some(duration),
            position: 0.0,
            paused: false,
            block_resume: false,
            next_listener: 0,
            listeners: Vec::new(),
            seeks: Vec::new(),
            resumes: 0,
            marker_bar: None,
        }
    }

    /// A page without a video element.
    pub fn without_video(location: impl Into<String>) -> Self {
        Self {
            duration: None,
            ..Self::new(location, f64::NAN)
        }
    }

    /// Change the address, as a single-page app would.
    pub fn navigate(&mut self, location: impl Into<String>, duration: f64) {
        self.location = location.into();
        self.duration = Some(duration);
        self.position = 0.0;
    }

    pub fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }

    pub fn seeks(&self) -> &[f64] {
        &self.seeks
    }

    pub fn resumes(&self) -> usize {
        self.resumes
    }

    pub fn marker_bar(&self) -> Option<&[MarkerStamp]> {
        self.marker_bar.as_deref()
    }
}

impl PlaybackControl for SimulatedPage {
    fn duration(&self) -> f64 {
        self.duration.unwrap_or(f64::NAN)
    }

    fn seek(&mut self, seconds: f64) {
        self.position = seconds;
        self.seeks.push(seconds);
    }

    fn resume(&mut self) -> Result<(), PlaybackError> {
        self.resumes += 1;
        if self.duration.is_none() {
            return Err(PlaybackError::NoVideo);
        }
        if self.block_resume {
            return Err(PlaybackError::ResumeRejected(
                "playback requires a user gesture".to_string(),
            ));
        }
        self.paused = false;
        Ok(())
    }
}

impl PageHost for SimulatedPage {
    fn location(&self) -> String {
        self.location.clone()
    }

    fn has_video(&self) -> bool {
        self.duration.is_some()
    }

    fn attach_position_listener(&mut self) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.push(id);
        id
    }

    fn detach_position_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|l| *l != id);
    }

    fn draw_marker_bar(&mut self, stamps: &[MarkerStamp]) {
        self.marker_bar = Some(stamps.to_vec());
    }

    fn remove_marker_bar(&mut self) {
        self.marker_bar = None;
    }
}
