//! Local persistence for BookFinder personalization.
//!
//! This crate keeps the user's favorites, reading lists, recent searches and
//! display preferences, writing every change through to durable storage.
//!
//! # Features
//!
//! - Three mutually exclusive reading lists
//! - Favorites, independent of the reading lists
//! - A bounded, deduplicated recent-search log
//! - View mode and theme preferences
//! - SQLite or in-memory storage, one JSON value per key
//! - Change notifications and JSON/CSV export
//!
//! # Example
//!
//! ```no_run
//! use bookfinder_store::Store;
//! use bookfinder_types::{BookRecord, ReadingList};
//!
//! let mut store = Store::open_default()?;
//!
//! let book = BookRecord::new("/works/OL45883W", "The Hobbit");
//! store.assign_to_reading_list(book, ReadingList::CurrentlyReading);
//!
//! assert_eq!(
//!     store.reading_list_of("/works/OL45883W"),
//!     Some(ReadingList::CurrentlyReading)
//! );
//! # Ok::<(), bookfinder_store::Error>(())
//! ```

mod clock;
mod error;
mod events;
mod export;
mod models;
mod schema;
mod storage;
mod store;

pub use clock::{Clock, ManualClock, SystemClock, format_millis};
pub use error::{Error, Result};
pub use events::{EventDispatcher, EventReceiver, EventSender, StoreEvent, StoreKey};
pub use export::{ExportFormat, ExportScope, export_to_path, export_to_string, write_export};
pub use models::{Favorites, MAX_RECENT_SEARCHES, ReadingLists, RecentSearches, StoreSnapshot};
pub use storage::{MemoryStorage, SqliteStorage, Storage};
pub use store::Store;

/// Default database path following platform conventions.
///
/// - Linux: `~/.local/share/bookfinder/data.db`
/// - macOS: `~/Library/Application Support/bookfinder/data.db`
/// - Windows: `C:\Users\<user>\AppData\Local\bookfinder\data.db`
pub fn default_db_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("bookfinder")
        .join("data.db")
}
