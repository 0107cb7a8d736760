//! Bar command handler

use std::io;

use anyhow::{bail, Result};

use ytstamps::cli::BarArgs;
use ytstamps::comments::ingest;
use ytstamps::timeline::{collect_marker_stamps, render_marker_bar};

use super::read_comments_file;
use super::style::Style;

const DEFAULT_WIDTH: u16 = 80;

#[cfg(not(tarpaulin_include))]
pub fn handle(args: BarArgs) -> Result<()> {
    if !args.duration.is_finite() || args.duration <= 0.0 {
        bail!("Video duration must be a positive number of seconds");
    }

    let comments = ingest(read_comments_file(&args.comments)?);
    let stamps = collect_marker_stamps(&comments, args.duration);
    let width = args.width.unwrap_or_else(|| {
        terminal_size::terminal_size()
            .map(|(w, _)| w.0)
            .unwrap_or(DEFAULT_WIDTH)
    });

    let mut stdout = io::stdout().lock();
    render_marker_bar(
        &mut stdout,
        width,
        args.at,
        args.duration,
        &stamps,
        Style::detect().color(),
    )?;

    tracing::debug!(comments = comments.len(), stamps = stamps.len(), "bar rendered");
    Ok(())
}
