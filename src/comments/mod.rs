//! Time-anchored comment records and the collaborators that fetch them.
//!
//! - `TimeComment`: validated, fixed-shape comment record
//! - `provider`: the `CommentProvider` trait and its implementations
//! - `source`: off-thread fetching with tickets (`CommentSource`)

mod provider;
mod source;

pub use provider::{CommentProvider, JsonDirProvider, MemoryProvider, ProviderError};
pub use source::{CommentSource, FetchResult, FetchTicket, ThreadedSource};

use serde::{Deserialize, Serialize};

/// A comment record as delivered by a provider, before validation.
///
/// `time` is kept as a raw JSON value because providers are not trusted
/// to send a number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTimeComment {
    #[serde(default)]
    pub comment_id: Option<String>,
    #[serde(default)]
    pub time: serde_json::Value,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_avatar: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Why a raw record was rejected at ingestion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommentError {
    #[error("comment has no id")]
    MissingId,

    #[error("comment {comment_id} has a non-numeric time")]
    NonNumericTime { comment_id: String },

    #[error("comment {comment_id} has an invalid time {time}")]
    InvalidTime { comment_id: String, time: f64 },
}

/// A validated time-anchored comment.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeComment {
    /// Opaque identifier assigned by the provider
    pub comment_id: String,
    /// Playback offset in seconds (finite, >= 0)
    pub time: f64,
    pub author_name: Option<String>,
    pub author_avatar: Option<String>,
    pub text: Option<String>,
    /// Display form of the anchor, e.g. "1:23"
    pub timestamp: Option<String>,
}

/// De-duplication identity of a comment: `(comment_id, timestamp)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OverlayKey {
    pub comment_id: String,
    pub timestamp: Option<String>,
}

impl TimeComment {
    /// Create a comment with only the required fields set.
    pub fn new(comment_id: impl Into<String>, time: f64) -> Self {
        Self {
            comment_id: comment_id.into(),
            time,
            author_name: None,
            author_avatar: None,
            text: None,
            timestamp: None,
        }
    }

    pub fn with_author(mut self, name: impl Into<String>) -> Self {
        self.author_name = Some(name.into());
        self
    }

    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.author_avatar = Some(url.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// The identity used to detect a comment that is already on screen.
    pub fn key(&self) -> OverlayKey {
        OverlayKey {
            comment_id: self.comment_id.clone(),
            timestamp: self.timestamp.clone(),
        }
    }
}

impl TryFrom<RawTimeComment> for TimeComment {
    type Error = CommentError;

    fn try_from(raw: RawTimeComment) -> Result<Self, Self::Error> {
        let comment_id = raw.comment_id.ok_or(CommentError::MissingId)?;
        let time = match raw.time.as_f64() {
            Some(t) => t,
            None => return Err(CommentError::NonNumericTime { comment_id }),
        };
        if !time.is_finite() || time < 0.0 {
            return Err(CommentError::InvalidTime { comment_id, time });
        }

        Ok(Self {
            comment_id,
            time,
            author_name: raw.author_name,
            author_avatar: raw.author_avatar,
            text: raw.text,
            timestamp: raw.timestamp,
        })
    }
}

/// Parse a JSON array of comment records element by element.
///
/// An element that does not have the record shape (an object with a
/// numeric `commentId`, say) is dropped with a debug log; the rest of the
/// array still loads. Only a payload that is not a JSON array is an error.
pub fn parse_records(content: &str) -> Result<Vec<RawTimeComment>, serde_json::Error> {
    let values: Vec<serde_json::Value> = serde_json::from_str(content)?;
    Ok(values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(index, error = %e, "dropping malformed comment record");
                None
            }
        })
        .collect())
}

/// Validate a batch of raw records, silently dropping the bad ones.
pub fn ingest(raw: Vec<RawTimeComment>) -> Vec<TimeComment> {
    raw.into_iter()
        .filter_map(|r| match TimeComment::try_from(r) {
            Ok(comment) => Some(comment),
            Err(e) => {
                tracing::debug!(error = %e, "dropping comment");
                None
            }
        })
        .collect()
}
