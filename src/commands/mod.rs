//! Subcommand handlers for the `ytstamps` binary.

pub mod bar;
pub mod completions;
pub mod config;
pub mod replay;
pub mod stamps;
pub mod style;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use ytstamps::comments::parse_records;
use ytstamps::RawTimeComment;

/// Read a JSON array of comment records, skipping malformed elements.
pub fn read_comments_file(path: &Path) -> Result<Vec<RawTimeComment>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read comments file {}", path.display()))?;
    parse_records(&content)
        .with_context(|| format!("Invalid comments file {}", path.display()))
}
