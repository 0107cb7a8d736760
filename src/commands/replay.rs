//! Replay command handler

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use ytstamps::cli::ReplayArgs;
use ytstamps::comments::{CommentProvider, JsonDirProvider, MemoryProvider};
use ytstamps::replay::{self, ReplayNavigation, ReplayOptions, ReplaySummary};
use ytstamps::session::video_id_from_url;
use ytstamps::Config;

use super::read_comments_file;
use super::style::Style;

/// Columns reserved for the clock, event and author before comment text.
const LINE_PREFIX_WIDTH: usize = 40;
const MIN_TEXT_WIDTH: usize = 20;

#[cfg(not(tarpaulin_include))]
pub fn handle(args: ReplayArgs) -> Result<()> {
    let config = Config::load()?;
    let options = build_options(&args, config.clone());

    let stop = Arc::new(AtomicBool::new(false));
    if args.realtime {
        let flag = Arc::clone(&stop);
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
            .context("Failed to install Ctrl+C handler")?;
    }
    let should_stop = move || stop.load(Ordering::SeqCst);

    let summary = if args.comments.is_some() || args.next_comments.is_some() {
        run_with(&options, memory_provider(&args)?, should_stop)?
    } else if let Some(dir) = config.provider.comments_dir.clone() {
        run_with(&options, JsonDirProvider::new(dir), should_stop)?
    } else {
        bail!("No comments source: pass --comments or set provider.comments_dir in the config");
    };

    print_summary(&summary);
    Ok(())
}

fn run_with<P: CommentProvider + 'static>(
    options: &ReplayOptions,
    provider: P,
    should_stop: impl Fn() -> bool,
) -> Result<ReplaySummary> {
    let stdout = io::stdout();
    replay::run(options, provider, stdout.lock(), should_stop)
}

fn build_options(args: &ReplayArgs, config: Config) -> ReplayOptions {
    let mut options = ReplayOptions::new(&args.url, args.duration);
    options.start = args.start;
    options.end = args.end;
    options.step = Duration::from_millis(args.step_ms);
    options.realtime = args.realtime;
    options.text_width = text_width();
    options.config = config;
    options.navigation = match (&args.navigate_to, args.navigate_at, args.next_duration) {
        (Some(url), Some(at), Some(duration)) => Some(ReplayNavigation {
            at,
            url: url.clone(),
            duration,
        }),
        _ => None,
    };
    options
}

/// Comments from `--comments` and `--next-comments`, keyed by the video ids
/// of their page addresses.
fn memory_provider(args: &ReplayArgs) -> Result<MemoryProvider> {
    let mut provider = MemoryProvider::new();
    if let Some(path) = &args.comments {
        let video_id = video_id_from_url(&args.url)
            .with_context(|| format!("No video id in {}", args.url))?;
        provider.insert(video_id, read_comments_file(path)?);
    }
    if let (Some(url), Some(path)) = (&args.navigate_to, &args.next_comments) {
        let video_id =
            video_id_from_url(url).with_context(|| format!("No video id in {}", url))?;
        provider.insert(video_id, read_comments_file(path)?);
    }
    Ok(provider)
}

fn text_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| (w.0 as usize).saturating_sub(LINE_PREFIX_WIDTH))
        .unwrap_or(60)
        .max(MIN_TEXT_WIDTH)
}

fn print_summary(summary: &ReplaySummary) {
    let style = Style::detect();
    let stats = &summary.stats;
    let mut line = format!(
        "{} comments, {} shown, {} queued, {} duplicates, at most {} on screen",
        summary.comments_loaded, stats.shown, stats.queued, stats.duplicates, stats.peak_active
    );
    if summary.navigated {
        line.push_str(", navigated");
    }
    if summary.interrupted {
        eprintln!("{}", style.secondary_text("Interrupted."));
    }
    eprintln!("{}", style.success_text(&line));
}
