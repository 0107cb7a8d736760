//! Config subcommands handler

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufRead, Write};

use ytstamps::config::migrate_config;
use ytstamps::Config;

use super::style::Style;

/// Show current configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{}", Style::detect().primary_text(toml_str.trim_end()));
    Ok(())
}

/// Open configuration file in the default editor.
///
/// Uses $EDITOR environment variable (defaults to 'vi').
#[cfg(not(tarpaulin_include))]
pub fn handle_edit() -> Result<()> {
    let config_path = Config::config_path()?;
    let style = Style::detect();

    // Ensure config exists
    if !config_path.exists() {
        Config::default().save()?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    println!(
        "{}",
        style.primary_text(&format!(
            "Opening {} with {}",
            config_path.display(),
            editor
        ))
    );

    std::process::Command::new(&editor)
        .arg(&config_path)
        .status()
        .with_context(|| format!("Failed to open editor {}", editor))?;

    Ok(())
}

/// Migrate config file by adding missing fields.
///
/// Shows the fields that would be added and asks for confirmation unless
/// `yes` is set.
#[cfg(not(tarpaulin_include))]
pub fn handle_migrate(yes: bool) -> Result<()> {
    let style = Style::detect();
    let config_path = Config::config_path()?;
    let file_exists = config_path.exists();

    let content = if file_exists {
        fs::read_to_string(&config_path)?
    } else {
        String::new()
    };

    let result = migrate_config(&content)?;

    if !result.has_changes() {
        println!("{}", style.primary_text("Config is already up to date."));
        return Ok(());
    }

    if file_exists {
        println!(
            "{}",
            style.primary_text(&format!(
                "Found {} missing field(s) in {} new section(s):",
                result.added_fields.len(),
                result.sections_added.len()
            ))
        );
    } else {
        println!(
            "{}",
            style.primary_text("Config file does not exist. Will create with default settings.")
        );
    }
    println!();
    print_diff_preview(&style, &result.content, &result.added_fields);
    println!();

    let question = format!("Write {}?", config_path.display());
    if !yes && !prompt_confirmation(&style, &question)? {
        println!("{}", style.primary_text("No changes made."));
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&config_path, &result.content)?;
    println!("{}", style.success_text("Config updated successfully."));

    Ok(())
}

/// Print the added `key = value` lines under their section headers.
fn print_diff_preview(style: &Style, new_content: &str, added_fields: &[String]) {
    let mut current_section = String::new();
    let mut pending_header: Option<String> = None;

    for line in new_content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            current_section = trimmed[1..trimmed.len() - 1].to_string();
            pending_header = Some(line.to_string());
            continue;
        }

        let Some(eq_pos) = trimmed.find('=') else {
            continue;
        };
        let key = trimmed[..eq_pos].trim();
        if added_fields.contains(&format!("{}.{}", current_section, key)) {
            if let Some(header) = pending_header.take() {
                println!("  {}", header);
            }
            println!("{}", style.added_line(line));
        }
    }
}

/// Prompt user for yes/no confirmation.
///
/// Non-interactive stdin counts as "no".
fn prompt_confirmation(style: &Style, message: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        println!(
            "{}",
            style.secondary_text("Non-interactive mode: use --yes to apply changes automatically")
        );
        return Ok(false);
    }

    print!("{} [y/N] ", style.primary_text(message));
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
