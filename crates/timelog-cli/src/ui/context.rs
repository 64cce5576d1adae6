//! Terminal detection.

use std::io::IsTerminal;

use crate::cli::FormatArg;

use super::mode::OutputMode;

#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether color output is enabled
    pub color: bool,
    /// Whether unicode symbols are enabled
    pub unicode: bool,
    /// Whether prompts can be shown
    pub interactive: bool,
    pub mode: OutputMode,
}

impl UiContext {
    /// Detect the terminal and resolve the output mode from `--json` and
    /// `--format`.
    pub fn from_env(json_flag: bool, format: Option<FormatArg>) -> Self {
        let stdout_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var("NO_COLOR").is_ok();

        Self {
            color: stdout_tty && !no_color_env && !term_is_dumb,
            unicode: !term_is_dumb,
            interactive: stdout_tty && std::io::stdin().is_terminal(),
            mode: OutputMode::resolve(json_flag, format, stdout_tty, term_is_dumb),
        }
    }
}
