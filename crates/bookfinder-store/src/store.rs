//! Main store implementation.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use bookfinder_types::{
    BookRecord, FavoriteEntry, ReadingList, ReadingListEntry, RecentSearch, Theme, ViewMode,
};

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::events::{EventDispatcher, EventReceiver, StoreEvent, StoreKey};
use crate::models::{Favorites, ReadingLists, RecentSearches, StoreSnapshot};
use crate::storage::{MemoryStorage, SqliteStorage, Storage};

/// Personalization store: reading lists, favorites, recent searches and
/// preferences.
///
/// Every mutating method updates memory and writes the affected key through
/// to storage before returning. A failed write is logged, recorded in
/// [`Store::last_write_error`] and broadcast as
/// [`StoreEvent::PersistFailed`]; the in-memory state stays authoritative for
/// the rest of the session.
pub struct Store {
    storage: Box<dyn Storage>,
    clock: Box<dyn Clock>,
    events: EventDispatcher,
    reading_lists: ReadingLists,
    favorites: Favorites,
    recent_searches: RecentSearches,
    view_mode: ViewMode,
    theme: Theme,
    last_write_error: Option<String>,
}

impl Store {
    /// Open or create a SQLite-backed store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::with_storage(SqliteStorage::open(path)?))
    }

    /// Open the store at the default database location.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::default_db_path())
    }

    /// Open a store that keeps everything in memory.
    pub fn open_in_memory() -> Self {
        Self::with_storage(MemoryStorage::new())
    }

    /// Load a store from any storage backend.
    ///
    /// Each key is read independently; a missing or unreadable value falls
    /// back to its default without affecting the others.
    pub fn with_storage(storage: impl Storage + 'static) -> Self {
        let storage: Box<dyn Storage> = Box::new(storage);

        let mut reading_lists: ReadingLists = load(storage.as_ref(), StoreKey::ReadingLists);
        let mut favorites: Favorites = load(storage.as_ref(), StoreKey::Favorites);
        let mut recent_searches: RecentSearches =
            load(storage.as_ref(), StoreKey::RecentSearches);
        let view_mode: ViewMode = load(storage.as_ref(), StoreKey::ViewMode);
        let theme: Theme = load(storage.as_ref(), StoreKey::Theme);

        let dropped = reading_lists.normalize();
        if dropped > 0 {
            warn!("Dropped {} reading list entries filed under more than one list", dropped);
        }
        let dropped = favorites.normalize();
        if dropped > 0 {
            warn!("Dropped {} duplicate favorites", dropped);
        }
        let dropped = recent_searches.normalize();
        if dropped > 0 {
            warn!("Dropped {} recent searches over the limit or duplicated", dropped);
        }

        info!(
            "Loaded store: {} reading list entries, {} favorites, {} recent searches",
            reading_lists.total(),
            favorites.len(),
            recent_searches.len()
        );

        Self {
            storage,
            clock: Box::new(SystemClock),
            events: EventDispatcher::default(),
            reading_lists,
            favorites,
            recent_searches,
            view_mode,
            theme,
            last_write_error: None,
        }
    }

    /// Use a different time source for new timestamps.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    /// Error message from the most recent write, or `None` if it succeeded.
    pub fn last_write_error(&self) -> Option<&str> {
        self.last_write_error.as_deref()
    }

    /// Copy of every persisted value.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            reading_lists: self.reading_lists.clone(),
            favorites: self.favorites.clone(),
            recent_searches: self.recent_searches.clone(),
            view_mode: self.view_mode,
            theme: self.theme,
        }
    }

    /// A record this store already holds, from favorites or any list.
    pub fn find_book(&self, key: &str) -> Option<&BookRecord> {
        self.reading_lists
            .find(key)
            .map(|entry| &entry.book)
            .or_else(|| self.favorites.find(key).map(|entry| &entry.book))
    }

    fn write(&self, key: StoreKey) -> Result<()> {
        let json = match key {
            StoreKey::ReadingLists => serde_json::to_string(&self.reading_lists)?,
            StoreKey::Favorites => serde_json::to_string(&self.favorites)?,
            StoreKey::RecentSearches => serde_json::to_string(&self.recent_searches)?,
            StoreKey::ViewMode => serde_json::to_string(&self.view_mode)?,
            StoreKey::Theme => serde_json::to_string(&self.theme)?,
        };
        self.storage.set(key.as_str(), &json)
    }

    /// Write `key` through to storage and notify subscribers.
    fn commit(&mut self, key: StoreKey) {
        let outcome = self.write(key);
        self.events.send(StoreEvent::Changed { key });

        match outcome {
            Ok(()) => self.last_write_error = None,
            Err(e) => {
                let message = e.to_string();
                warn!(
                    "Failed to persist '{}', change kept for this session only: {}",
                    key.as_str(),
                    message
                );
                self.events.send(StoreEvent::PersistFailed {
                    key,
                    message: message.clone(),
                });
                self.last_write_error = Some(message);
            }
        }
    }
}

/// Read and parse one key, falling back to the default on any failure.
fn load<T: DeserializeOwned + Default>(storage: &dyn Storage, key: StoreKey) -> T {
    let raw = match storage.get(key.as_str()) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            warn!("Failed to read '{}', using default: {}", key.as_str(), e);
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Stored '{}' is malformed, using default: {}", key.as_str(), e);
            T::default()
        }
    }
}

// Reading list operations
impl Store {
    /// Place `book` on `list`, removing it from any other list first.
    ///
    /// The entry is stamped with the current time and appended, so a book
    /// re-assigned to its own list moves to the end.
    pub fn assign_to_reading_list(&mut self, book: BookRecord, list: ReadingList) {
        debug!("Assigning {} to {}", book.key, list.as_key());
        let now = self.clock.now_millis();
        self.reading_lists.assign(book, list, now);
        self.commit(StoreKey::ReadingLists);
    }

    /// Remove `key` from `list`. Returns whether an entry was removed;
    /// removing an absent key changes nothing.
    pub fn remove_from_reading_list(&mut self, key: &str, list: ReadingList) -> bool {
        if !self.reading_lists.remove(key, list) {
            debug!("{} is not on {}, nothing to remove", key, list.as_key());
            return false;
        }
        debug!("Removed {} from {}", key, list.as_key());
        self.commit(StoreKey::ReadingLists);
        true
    }

    /// The list holding `key`, if any.
    pub fn reading_list_of(&self, key: &str) -> Option<ReadingList> {
        self.reading_lists.membership(key)
    }

    /// All three lists.
    pub fn reading_lists(&self) -> &ReadingLists {
        &self.reading_lists
    }

    /// Entries of one list in insertion order.
    pub fn reading_list(&self, list: ReadingList) -> &[ReadingListEntry] {
        self.reading_lists.get(list)
    }
}

// Favorite operations
impl Store {
    /// Add `book` to favorites, or remove it if already there. Returns
    /// whether it is a favorite afterwards.
    pub fn toggle_favorite(&mut self, book: BookRecord) -> bool {
        let now = self.clock.now_millis();
        let key = book.key.clone();
        let favorite = self.favorites.toggle(book, now);
        debug!(
            "{} {} favorites",
            key,
            if favorite { "added to" } else { "removed from" }
        );
        self.commit(StoreKey::Favorites);
        favorite
    }

    /// Whether `key` is a favorite.
    pub fn is_favorite(&self, key: &str) -> bool {
        self.favorites.contains(key)
    }

    /// Favorites in the order they were added.
    pub fn favorites(&self) -> &[FavoriteEntry] {
        self.favorites.as_slice()
    }
}

// Recent search operations
impl Store {
    /// Record a submitted query. Blank queries are ignored; returns whether
    /// the log changed.
    pub fn record_search(&mut self, query: &str) -> bool {
        let now = self.clock.now_millis();
        if !self.recent_searches.record(query, now) {
            return false;
        }
        self.commit(StoreKey::RecentSearches);
        true
    }

    /// Empty the recent-search log.
    pub fn clear_recent_searches(&mut self) {
        self.recent_searches.clear();
        self.commit(StoreKey::RecentSearches);
    }

    /// Recent searches, most recent first.
    pub fn recent_searches(&self) -> &[RecentSearch] {
        self.recent_searches.as_slice()
    }
}

// Preference operations
impl Store {
    /// Current view mode.
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Change the view mode.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
        self.commit(StoreKey::ViewMode);
    }

    /// Current theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Change the theme and tell subscribers to switch visual mode.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.commit(StoreKey::Theme);
        self.events.send(StoreEvent::ThemeChanged { theme });
    }

    /// Switch between light and dark. Returns the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.theme.toggled();
        self.set_theme(theme);
        theme
    }
}
