//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Time-anchored comment overlays for video playback
#[derive(Debug, Parser)]
#[command(name = "ytstamps", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a video's comment overlays on a virtual clock
    #[command(long_about = "Replay a video's comment overlays on a virtual clock.\n\n\
        Plays the video from --start to --end in fixed steps and prints one line\n\
        per overlay event (show, fade, hide). Comments come from --comments, or\n\
        from <provider.comments_dir>/<video id>.json when no file is given.")]
    Replay(ReplayArgs),

    /// Print the marker bar for a comments file
    Bar(BarArgs),

    /// Show the timestamps detected in a piece of text
    Stamps {
        /// Text to scan, e.g. "best part is at 1:02:03"
        text: String,
    },

    /// Show or edit the configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Debug, clap::Args)]
pub struct ReplayArgs {
    /// Page address of the video, e.g. https://www.youtube.com/watch?v=<id>
    #[arg(long)]
    pub url: String,

    /// Video duration in seconds
    #[arg(long)]
    pub duration: f64,

    /// JSON file with the video's comments
    #[arg(long, value_name = "FILE")]
    pub comments: Option<PathBuf>,

    /// Playhead position to start from (seconds)
    #[arg(long, default_value_t = 0.0)]
    pub start: f64,

    /// Playhead position to stop at (seconds)
    #[arg(long)]
    pub end: Option<f64>,

    /// Milliseconds between playback ticks
    #[arg(long, default_value_t = 250)]
    pub step_ms: u64,

    /// Sleep between ticks instead of running as fast as possible
    #[arg(long)]
    pub realtime: bool,

    /// Navigate to this address during the replay
    #[arg(long, value_name = "URL", requires_all = ["navigate_at", "next_duration"])]
    pub navigate_to: Option<String>,

    /// Playhead position at which to navigate (seconds)
    #[arg(long, value_name = "SECS")]
    pub navigate_at: Option<f64>,

    /// Duration of the video navigated to (seconds)
    #[arg(long, value_name = "SECS")]
    pub next_duration: Option<f64>,

    /// JSON file with the comments of the video navigated to
    #[arg(long, value_name = "FILE")]
    pub next_comments: Option<PathBuf>,
}

#[derive(Debug, clap::Args)]
pub struct BarArgs {
    /// JSON file with the video's comments
    pub comments: PathBuf,

    /// Video duration in seconds
    #[arg(long)]
    pub duration: f64,

    /// Playhead position to mark (seconds)
    #[arg(long, default_value_t = 0.0)]
    pub at: f64,

    /// Bar width in columns (defaults to the terminal width)
    #[arg(long)]
    pub width: Option<u16>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the current configuration as TOML
    Show,
    /// Open the configuration file in $EDITOR
    Edit,
    /// Add missing fields to the configuration file
    Migrate {
        /// Apply without asking
        #[arg(long, short)]
        yes: bool,
    },
}
