//! Change notifications for store subscribers.
//!
//! Every mutation that changes state emits [`StoreEvent::Changed`] for the
//! key it touched. Views subscribe once and re-render on each event instead
//! of polling the store.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use bookfinder_types::Theme;

/// The five independently persisted store values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StoreKey {
    /// The reading-list partition.
    ReadingLists,
    /// The favorites set.
    Favorites,
    /// The recent-search log.
    RecentSearches,
    /// The view mode preference.
    ViewMode,
    /// The theme preference.
    Theme,
}

impl StoreKey {
    /// All keys in load order.
    pub const ALL: [StoreKey; 5] = [
        StoreKey::ReadingLists,
        StoreKey::Favorites,
        StoreKey::RecentSearches,
        StoreKey::ViewMode,
        StoreKey::Theme,
    ];

    /// Storage key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::ReadingLists => "readingLists",
            StoreKey::Favorites => "favorites",
            StoreKey::RecentSearches => "recentSearches",
            StoreKey::ViewMode => "viewMode",
            StoreKey::Theme => "theme",
        }
    }
}

/// Events emitted by the store.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new event types
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum StoreEvent {
    /// In-memory state for `key` changed.
    Changed { key: StoreKey },
    /// The theme changed; the UI should switch its visual mode.
    ThemeChanged { theme: Theme },
    /// State changed but could not be written to storage.
    PersistFailed { key: StoreKey, message: String },
}

/// Sender for store events.
pub type EventSender = broadcast::Sender<StoreEvent>;

/// Receiver for store events.
pub type EventReceiver = broadcast::Receiver<StoreEvent>;

/// Fan-out of store events to any number of receivers.
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    sender: EventSender,
}

impl EventDispatcher {
    /// Create a new event dispatcher.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events.
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Send an event.
    pub fn send(&self, event: StoreEvent) {
        // No receivers is fine
        let _ = self.sender.send(event);
    }

    /// Get the number of active receivers.
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new(100)
    }
}
