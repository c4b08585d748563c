//! Command-line front end for BookFinder.
//!
//! Search the Open Library catalog and keep favorites, reading lists and
//! recent searches on the local machine.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `search` | Search the catalog by title, author or subject |
//! | `list` | Show, add to, remove from and export reading lists |
//! | `favorite` | Show, toggle and check favorites |
//! | `history` | Show or clear recent searches |
//! | `view` | Show or set the result layout (grid, list) |
//! | `theme` | Show, set or toggle the color theme |
//! | `config` | Manage CLI configuration |
//! | `completions` | Generate shell completions |
//!
//! # Output Formats
//!
//! - **Text** (default): human-readable output, styled by the stored theme
//! - **JSON**: machine-readable output (`--json` or `--format json`)
//!
//! Reading lists and favorites can also be exported to JSON or CSV files.
//!
//! # Configuration
//!
//! The CLI reads `~/.config/bookfinder/config.toml` (or platform equivalent):
//!
//! - `catalog_url`: catalog base URL (default `https://openlibrary.org`)
//! - `page_size`: results per page (default 20)
//! - `timeout`: request timeout in seconds (default 10)
//! - `db_path`: where favorites, reading lists and preferences are kept
//! - `no_color`: disable colored output
//! - `format`: default output format
//!
//! # Environment Variables
//!
//! - `BOOKFINDER_DB`: database file (overridden by `--db`)
//! - `NO_COLOR`: disable colored output when set
//! - `RUST_LOG`: log filter when neither `--verbose` nor `--quiet` is given
//!
//! # Examples
//!
//! Search by title and author:
//! ```bash
//! bookfinder search "the hobbit" --author tolkien
//! ```
//!
//! Put a book on a reading list:
//! ```bash
//! bookfinder list add /works/OL45883W currently-reading
//! ```
//!
//! Export favorites as CSV:
//! ```bash
//! bookfinder list export favorites --format csv
//! ```

// The binary lives in main.rs; this target documents the CLI and re-exports
// the crates it is built on.

pub use bookfinder_core;
pub use bookfinder_store;
pub use bookfinder_types;
