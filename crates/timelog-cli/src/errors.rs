//! CLI error types mapped to exit codes.

use std::fmt;

use timelog_core::{Notice, NoticeKind};

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Entry or template not found
    NotFound { message: String, hint: String },

    /// Input the session rejected
    InvalidInput(String),

    /// Export with an empty log
    NothingToExport(String),

    /// Anything else the session reported
    Failed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => write!(f, "{}\n{}", message, hint),
            CliError::InvalidInput(message)
            | CliError::NothingToExport(message)
            | CliError::Failed(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Convert a notice reported by the session, attaching `hint` to
    /// not-found notices.
    pub fn from_notice(notice: &Notice, hint: &str) -> Self {
        let message = notice.message.clone();
        match notice.kind {
            NoticeKind::Validation | NoticeKind::InvalidState => CliError::InvalidInput(message),
            NoticeKind::NotFound => CliError::not_found(message, hint),
            NoticeKind::NothingToExport => CliError::NothingToExport(message),
            NoticeKind::Failure => CliError::Failed(message),
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::NothingToExport(_) => exit_codes::NOTHING_TO_EXPORT,
            CliError::Failed(_) => exit_codes::GENERAL,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(kind: NoticeKind, message: &str) -> Notice {
        Notice {
            kind,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_exit_codes_follow_notice_kind() {
        let cases = [
            (NoticeKind::Validation, 4),
            (NoticeKind::InvalidState, 4),
            (NoticeKind::NotFound, 3),
            (NoticeKind::NothingToExport, 5),
            (NoticeKind::Failure, 1),
        ];
        for (kind, code) in cases {
            assert_eq!(CliError::from_notice(&notice(kind, "x"), "").exit_code(), code);
        }
    }

    #[test]
    fn test_not_found_display_includes_hint() {
        let err = CliError::from_notice(
            &notice(NoticeKind::NotFound, "Entry abc not found"),
            "Run `timelog list` to see entry IDs.",
        );
        assert_eq!(
            err.to_string(),
            "Entry abc not found\nRun `timelog list` to see entry IDs."
        );
    }
}
