//! Stamps command handler

use anyhow::Result;

use ytstamps::overlay::presenter::{split_timestamps, TextSegment};

use super::style::Style;

#[cfg(not(tarpaulin_include))]
pub fn handle(text: &str) -> Result<()> {
    let style = Style::detect();
    let lines = describe(text);
    if lines.is_empty() {
        println!("{}", style.secondary_text("No timestamps found."));
    }
    for line in lines {
        println!("{}", style.primary_text(&line));
    }
    Ok(())
}

/// One line per timestamp: the label and the position it seeks to.
fn describe(text: &str) -> Vec<String> {
    split_timestamps(text)
        .into_iter()
        .filter_map(|segment| match segment {
            TextSegment::Stamp {
                label,
                seconds: Some(secs),
            } => Some(format!("{} -> {}s", label, secs)),
            TextSegment::Stamp {
                label,
                seconds: None,
            } => Some(format!("{} -> invalid", label)),
            TextSegment::Plain(_) => None,
        })
        .collect()
}
