//! Output mode routing.

use crate::cli::FormatArg;

/// How command output is formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Machine-readable JSON only
    Json,
    /// Tab-separated lines, stable for scripts
    #[default]
    Plain,
    /// Tables and colors for a terminal
    Pretty,
    /// HTML fragment for embedding elsewhere
    Html,
}

impl OutputMode {
    /// `--json` wins, then an explicit `--format`; otherwise pretty on a
    /// capable terminal and plain everywhere else.
    pub fn resolve(
        json_flag: bool,
        format: Option<FormatArg>,
        is_tty: bool,
        term_is_dumb: bool,
    ) -> Self {
        if json_flag {
            return Self::Json;
        }
        match format {
            Some(FormatArg::Html) => Self::Html,
            Some(FormatArg::Plain) => Self::Plain,
            Some(FormatArg::Table) => Self::Pretty,
            None if is_tty && !term_is_dumb => Self::Pretty,
            None => Self::Plain,
        }
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_flag_wins() {
        assert_eq!(
            OutputMode::resolve(true, Some(FormatArg::Html), true, false),
            OutputMode::Json
        );
    }

    #[test]
    fn test_explicit_format() {
        assert_eq!(
            OutputMode::resolve(false, Some(FormatArg::Table), false, false),
            OutputMode::Pretty
        );
        assert_eq!(
            OutputMode::resolve(false, Some(FormatArg::Plain), true, false),
            OutputMode::Plain
        );
        assert_eq!(
            OutputMode::resolve(false, Some(FormatArg::Html), false, false),
            OutputMode::Html
        );
    }

    #[test]
    fn test_terminal_detection() {
        assert_eq!(OutputMode::resolve(false, None, true, false), OutputMode::Pretty);
        assert_eq!(OutputMode::resolve(false, None, true, true), OutputMode::Plain);
        assert_eq!(OutputMode::resolve(false, None, false, false), OutputMode::Plain);
    }
}
