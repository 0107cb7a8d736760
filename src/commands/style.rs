//! Output styling for CLI messages.

pub const GREEN: &str = "\x1b[32m";
pub const GRAY: &str = "\x1b[37m";
pub const DARK_GRAY: &str = "\x1b[90m";
pub const RESET: &str = "\x1b[0m";

/// Colors CLI messages when stdout is a terminal and `NO_COLOR` is unset.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    color: bool,
}

impl Style {
    pub fn detect() -> Self {
        Self {
            color: std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout),
        }
    }

    pub fn color(&self) -> bool {
        self.color
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    pub fn primary_text(&self, text: &str) -> String {
        self.paint(GRAY, text)
    }

    pub fn secondary_text(&self, text: &str) -> String {
        self.paint(DARK_GRAY, text)
    }

    pub fn success_text(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    /// A `+ line` for diff previews.
    pub fn added_line(&self, line: &str) -> String {
        self.paint(GREEN, &format!("+ {}", line))
    }
}
