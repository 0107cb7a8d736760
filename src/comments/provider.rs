//! CommentProvider trait and implementations.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use super::{parse_records, RawTimeComment};

/// Errors a provider may report. They never cross the session boundary:
/// the fetch worker turns every error into "no comments".
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("No comments available for video {video_id}")]
    NotFound { video_id: String },

    #[error("Failed to read comments: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse comments: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Something that can return the time-anchored comments of a video.
///
/// Implementations are run on the fetch worker thread, so they must be
/// `Send`. They may block.
pub trait CommentProvider: Send {
    /// Human-readable name for logging.
    fn name(&self) -> &'static str;

    /// Fetch every comment record for `video_id`.
    fn fetch(&self, video_id: &str) -> Result<Vec<RawTimeComment>, ProviderError>;
}

/// Reads `<dir>/<video_id>.json`, a JSON array of comment records.
#[derive(Debug, Clone)]
pub struct JsonDirProvider {
    dir: PathBuf,
}

impl JsonDirProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, video_id: &str) -> Option<PathBuf> {
        // Video ids never contain path separators; refuse anything that does.
        if video_id.is_empty() || video_id.contains(['/', '\\']) || video_id.starts_with('.') {
            return None;
        }
        Some(self.dir.join(format!("{}.json", video_id)))
    }
}

impl CommentProvider for JsonDirProvider {
    fn name(&self) -> &'static str {
        "json-dir"
    }

    fn fetch(&self, video_id: &str) -> Result<Vec<RawTimeComment>, ProviderError> {
        let path = self
            .path_for(video_id)
            .filter(|p| p.exists())
            .ok_or_else(|| ProviderError::NotFound {
                video_id: video_id.to_string(),
            })?;
        let content = fs::read_to_string(&path)?;
        Ok(parse_records(&content)?)
    }
}

/// In-memory provider keyed by video id.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    comments: HashMap<String, Vec<RawTimeComment>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the comments served for `video_id`.
    pub fn insert(&mut self, video_id: impl Into<String>, comments: Vec<RawTimeComment>) {
        self.comments.insert(video_id.into(), comments);
    }

    pub fn with(mut self, video_id: impl Into<String>, comments: Vec<RawTimeComment>) -> Self {
        self.insert(video_id, comments);
        self
    }
}

impl CommentProvider for MemoryProvider {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn fetch(&self, video_id: &str) -> Result<Vec<RawTimeComment>, ProviderError> {
        self.comments
            .get(video_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound {
                video_id: video_id.to_string(),
            })
    }
}
