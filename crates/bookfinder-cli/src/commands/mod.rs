//! Command implementations for the CLI.

mod config;
mod favorite;
mod history;
mod list;
mod prefs;
mod search;

pub use config::cmd_config;
pub use favorite::cmd_favorite;
pub use history::cmd_history;
pub use list::cmd_list;
pub use prefs::{cmd_theme, cmd_view};
pub use search::cmd_search;
