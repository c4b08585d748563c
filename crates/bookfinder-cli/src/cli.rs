//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use bookfinder_store::{ExportFormat, ExportScope};
use bookfinder_types::{ReadingList, Theme, ViewMode};

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Reusable output format arguments
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output format (defaults to the config file, then text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Reusable search filter arguments
#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Free-text query (title, author or keywords)
    #[arg(default_value = "")]
    pub query: String,

    /// Restrict to an author
    #[arg(short, long)]
    pub author: Option<String>,

    /// Restrict to a subject
    #[arg(short, long)]
    pub subject: Option<String>,

    /// Page of results to show (1-based)
    #[arg(short, long, default_value = "1")]
    pub page: u32,

    /// Results per page (defaults to the config file, then 20)
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Only show books first published in or after this year
    #[arg(long)]
    pub year_from: Option<i32>,

    /// Only show books first published in or before this year
    #[arg(long)]
    pub year_to: Option<i32>,
}

#[derive(Parser)]
#[command(name = "bookfinder")]
#[command(author, version, about = "Search the Open Library catalog and keep reading lists", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as JSON (shorthand for --format json)
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Database file for favorites, reading lists and preferences
    #[arg(long, global = true, env = "BOOKFINDER_DB")]
    pub db: Option<PathBuf>,

    /// Keep everything in memory for this run; nothing is saved
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the catalog
    Search {
        #[command(flatten)]
        search: SearchArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Manage reading lists
    List {
        #[command(subcommand)]
        action: ListAction,
    },

    /// Manage favorites
    #[command(alias = "fav")]
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },

    /// Show or clear recent searches
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Show or set the result layout
    View {
        /// New view mode
        #[arg(value_parser = parse_view_mode)]
        mode: Option<ViewMode>,
    },

    /// Show, set or toggle the color theme
    Theme {
        /// New theme
        #[arg(value_enum)]
        theme: Option<ThemeArg>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Reading list subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ListAction {
    /// Show one reading list, or all of them
    Show {
        /// Reading list (want-to-read, currently-reading, completed)
        #[arg(value_parser = parse_reading_list)]
        list: Option<ReadingList>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Put a book on a reading list, moving it from any other list
    Add {
        /// Catalog key (e.g. /works/OL45883W)
        key: String,

        /// Reading list (want-to-read, currently-reading, completed)
        #[arg(value_parser = parse_reading_list)]
        list: ReadingList,
    },

    /// Take a book off a reading list
    #[command(alias = "rm")]
    Remove {
        /// Catalog key
        key: String,

        /// Reading list the book is on
        #[arg(value_parser = parse_reading_list)]
        list: ReadingList,
    },

    /// Show which reading list a book is on
    Status {
        /// Catalog key
        key: String,
    },

    /// Export reading lists or favorites to a file
    Export {
        /// What to export: all, favorites, or a reading list
        #[arg(default_value = "all", value_parser = parse_export_scope)]
        scope: ExportScope,

        /// File format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormatArg,

        /// Output file (defaults to a name derived from the scope)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Favorite subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum FavoriteAction {
    /// List favorites
    Show {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Add a book to favorites, or remove it if already there
    Toggle {
        /// Catalog key
        key: String,
    },

    /// Check whether a book is a favorite
    Check {
        /// Catalog key
        key: String,
    },
}

/// Recent search subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum HistoryAction {
    /// List recent searches, most recent first
    Show {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Forget all recent searches
    Clear,
}

/// Theme argument values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    /// Switch to the other theme
    Toggle,
}

/// Export file format values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormatArg {
    Json,
    Csv,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Json => ExportFormat::Json,
            ExportFormatArg::Csv => ExportFormat::Csv,
        }
    }
}

impl ThemeArg {
    /// The theme to apply, given the current one.
    pub fn resolve(self, current: Theme) -> Theme {
        match self {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Toggle => current.toggled(),
        }
    }
}

/// Parse a reading list name
fn parse_reading_list(s: &str) -> Result<ReadingList, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid reading list '{}'. Valid lists: want-to-read, currently-reading, completed",
            s
        )
    })
}

/// Parse an export scope
fn parse_export_scope(s: &str) -> Result<ExportScope, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid export scope '{}'. Use: all, favorites, want-to-read, currently-reading, completed",
            s
        )
    })
}

/// Parse a view mode
fn parse_view_mode(s: &str) -> Result<ViewMode, String> {
    s.parse()
        .map_err(|_| format!("Invalid view mode '{}'. Use: grid, list", s))
}

/// Parse boolean argument with flexible input
pub fn parse_bool_arg(s: &str) -> Result<bool, String> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" | "enable" | "enabled" => Ok(true),
        "false" | "no" | "off" | "0" | "disable" | "disabled" => Ok(false),
        _ => Err(format!(
            "Invalid boolean value '{}'. Use: true/false, yes/no, on/off, 1/0",
            s
        )),
    }
}

/// Configuration keys
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConfigKey {
    /// Catalog base URL
    CatalogUrl,
    /// Results per page
    PageSize,
    /// Request timeout in seconds
    Timeout,
    /// Database file path
    DbPath,
    /// Disable colored output
    NoColor,
    /// Default output format
    Format,
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
        /// Configuration value
        value: String,
    },

    /// Unset (remove) a configuration value
    Unset {
        /// Configuration key to remove
        #[arg(value_enum)]
        key: ConfigKey,
    },

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init,
}
