//! Timestamp detection, parsing and formatting.

use once_cell::sync::Lazy;
use regex::Regex;

/// `[h:]m:ss` with one or two digit groups; at least one colon is required
/// so plain numbers in comment text are left alone.
static TIMESTAMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]?[0-9]:)?([0-9]?[0-9]:)[0-9][0-9]").expect("valid timestamp regex")
});

/// A piece of overlay body text.
#[derive(Debug, Clone, PartialEq)]
pub enum TextSegment {
    /// Literal text
    Plain(String),
    /// An embedded timestamp the viewer can activate
    Stamp {
        label: String,
        /// Parsed seek target, `None` when the label is out of range
        seconds: Option<u64>,
    },
}

impl TextSegment {
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::Stamp { label, .. } => label,
        }
    }

    pub fn is_stamp(&self) -> bool {
        matches!(self, Self::Stamp { .. })
    }
}

/// Parse a `SS`, `MM:SS` or `H:MM:SS` timestamp into seconds.
///
/// With more than three groups only the last three count. Returns `None`
/// for non-numeric groups, for seconds or minutes above 59, and when the
/// total does not fit in a `u64`.
pub fn parse_timestamp(ts: &str) -> Option<u64> {
    if ts.is_empty() {
        return None;
    }
    let parts = ts
        .split(':')
        .map(|p| p.trim().parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;

    match parts.as_slice() {
        [s] => Some(*s),
        [m, s] => {
            if *s > 59 {
                return None;
            }
            m.checked_mul(60)?.checked_add(*s)
        }
        [.., h, m, s] => {
            if *s > 59 || *m > 59 {
                return None;
            }
            h.checked_mul(3600)?.checked_add(m * 60 + s)
        }
        [] => None,
    }
}

/// Format seconds as `M:SS`, or `H:MM:SS` from one hour up.
///
/// Fractions are truncated; non-finite input gives an empty string.
pub fn format_hms(seconds: f64) -> String {
    if !seconds.is_finite() {
        return String::new();
    }
    let total = seconds.max(0.0) as u64;
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

/// Split free text into plain runs and activatable timestamp spans.
pub fn split_timestamps(text: &str) -> Vec<TextSegment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in TIMESTAMP_RE.find_iter(text) {
        if m.start() > last {
            segments.push(TextSegment::Plain(text[last..m.start()].to_string()));
        }
        segments.push(TextSegment::Stamp {
            label: m.as_str().to_string(),
            seconds: parse_timestamp(m.as_str()),
        });
        last = m.end();
    }

    if last < text.len() {
        segments.push(TextSegment::Plain(text[last..].to_string()));
    }
    segments
}
