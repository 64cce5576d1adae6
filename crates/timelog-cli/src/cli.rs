use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use timelog_core::VERSION;

/// Timelog - log what you worked on, when you worked on it
#[derive(Parser)]
#[command(name = "timelog")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the timelog database
    #[arg(long, global = true, env = "TIMELOG_DB", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default config file and create the database
    Init(InitArgs),

    /// Log a new entry
    Add(AddArgs),

    /// Capture a timestamp now and describe it afterwards
    Quick(QuickArgs),

    /// Edit an existing entry
    Edit(EditArgs),

    /// Delete an entry
    Delete {
        /// Entry ID
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Delete every entry
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// List entries, newest first
    List(ListArgs),

    /// Export all entries as CSV
    Export(ExportArgs),

    /// Manage description templates
    #[command(subcommand)]
    Template(TemplateCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// IANA timezone used for local display (defaults to the system zone)
    #[arg(long)]
    pub timezone: Option<String>,

    /// Default display mode for `list`
    #[arg(long, value_enum)]
    pub display: Option<DisplayArg>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// What you worked on
    #[arg(value_name = "DESCRIPTION")]
    pub description: Option<String>,

    /// Date/time of the entry (defaults to now)
    #[arg(long, value_name = "TIMESTAMP")]
    pub at: Option<String>,

    /// Optional notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Use a template's name as the description
    #[arg(long, value_name = "ID", conflicts_with = "description")]
    pub template: Option<String>,
}

/// Arguments for the `quick` command
#[derive(Args)]
pub struct QuickArgs {
    /// Date/time to capture (defaults to now)
    #[arg(long, value_name = "TIMESTAMP")]
    pub at: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Entry ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// New date/time
    #[arg(long, value_name = "TIMESTAMP")]
    pub at: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New notes (empty string clears them)
    #[arg(long)]
    pub notes: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Show timestamps in UTC
    #[arg(long, conflicts_with = "local")]
    pub utc: bool,

    /// Show timestamps in local time
    #[arg(long)]
    pub local: bool,

    /// Output format
    #[arg(long, value_enum, conflicts_with = "json")]
    pub format: Option<FormatArg>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,

    /// Maximum number of entries to show
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Directory the CSV file is written to (defaults to the current directory)
    #[arg(long, value_name = "DIR", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Write the CSV document to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// Save a description template
    Add {
        /// Template name
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// List templates
    List {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a template
    Delete {
        /// Template ID
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DisplayArg {
    Local,
    Utc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Table,
    Plain,
    Html,
}
