//! UI context for environment detection and configuration.

use std::io::IsTerminal;

use chrono::{DateTime, Utc};

use super::mode::OutputMode;

/// Terminal and environment context for UI decisions.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether color output is enabled
    pub color: bool,
    /// Resolved output mode
    pub mode: OutputMode,
    /// strftime format for timestamps in text output
    pub date_format: String,
}

impl UiContext {
    /// Create context from environment and CLI flags.
    pub fn from_env(json_flag: bool, date_format: String) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var("NO_COLOR").is_ok();

        let color = is_tty && !no_color_env && !term_is_dumb;
        let mode = OutputMode::resolve(json_flag, is_tty, term_is_dumb);

        Self {
            color,
            mode,
            date_format,
        }
    }

    /// Plain, uncolored context for tests and non-interactive output.
    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            color: false,
            mode: OutputMode::Plain,
            date_format: crate::constants::DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    pub fn format_time(&self, timestamp: &DateTime<Utc>) -> String {
        timestamp.format(&self.date_format).to_string()
    }
}
