//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// 0 is success, 2 is left to clap for usage errors and 3+ are
/// application-specific.
pub mod exit_codes {
    /// Unhandled failure (storage, I/O).
    pub const GENERAL: i32 = 1;

    /// Entry or template not found.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input (empty description, bad timestamp, wrong state).
    pub const INVALID_INPUT: i32 = 4;

    /// Export requested with no entries.
    pub const NOTHING_TO_EXPORT: i32 = 5;
}

/// Hint shown when an entry ID does not resolve.
pub const ENTRY_ID_HINT: &str = "Run `timelog list` to see entry IDs.";

/// Hint shown when a template ID does not resolve.
pub const TEMPLATE_ID_HINT: &str = "Run `timelog template list` to see template IDs.";
