//! ytstamps CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ytstamps::cli::{Cli, Commands, ConfigCommands};

/// Environment variable holding the log filter, e.g. `ytstamps=debug`.
const LOG_ENV: &str = "YTSTAMPS_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Replay(args) => commands::replay::handle(args),
        Commands::Bar(args) => commands::bar::handle(args),
        Commands::Stamps { text } => commands::stamps::handle(&text),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Edit => commands::config::handle_edit(),
            ConfigCommands::Migrate { yes } => commands::config::handle_migrate(yes),
        },
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
