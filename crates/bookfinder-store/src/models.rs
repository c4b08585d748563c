//! In-memory collections held by the store.
//!
//! Each type owns one persisted value and enforces its own invariants; the
//! [`Store`](crate::Store) adds timestamps, persistence and notifications.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use bookfinder_types::{
    BookRecord, FavoriteEntry, ReadingList, ReadingListEntry, RecentSearch, Theme, ViewMode,
};

/// Maximum number of entries kept in the recent-search log.
pub const MAX_RECENT_SEARCHES: usize = 10;

/// The three reading lists.
///
/// A key appears in at most one list. Entries keep insertion order.
///
/// Buckets other than the three known ones are ignored when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingLists {
    #[serde(default)]
    want_to_read: Vec<ReadingListEntry>,
    #[serde(default)]
    currently_reading: Vec<ReadingListEntry>,
    #[serde(default)]
    completed: Vec<ReadingListEntry>,
}

impl ReadingLists {
    /// Entries of one list in insertion order.
    pub fn get(&self, list: ReadingList) -> &[ReadingListEntry] {
        match list {
            ReadingList::WantToRead => &self.want_to_read,
            ReadingList::CurrentlyReading => &self.currently_reading,
            ReadingList::Completed => &self.completed,
        }
    }

    fn get_mut(&mut self, list: ReadingList) -> &mut Vec<ReadingListEntry> {
        match list {
            ReadingList::WantToRead => &mut self.want_to_read,
            ReadingList::CurrentlyReading => &mut self.currently_reading,
            ReadingList::Completed => &mut self.completed,
        }
    }

    /// Place `book` at the end of `list`, removing it from every list first.
    pub fn assign(&mut self, book: BookRecord, list: ReadingList, added_at: i64) {
        for other in ReadingList::ALL {
            self.get_mut(other).retain(|entry| entry.book.key != book.key);
        }
        self.get_mut(list).push(ReadingListEntry { book, added_at });
    }

    /// Remove `key` from `list` only. Returns whether anything was removed.
    pub fn remove(&mut self, key: &str, list: ReadingList) -> bool {
        let entries = self.get_mut(list);
        let before = entries.len();
        entries.retain(|entry| entry.book.key != key);
        entries.len() != before
    }

    /// The list holding `key`, if any.
    pub fn membership(&self, key: &str) -> Option<ReadingList> {
        ReadingList::ALL
            .into_iter()
            .find(|list| self.get(*list).iter().any(|entry| entry.book.key == key))
    }

    /// The entry for `key`, wherever it is.
    pub fn find(&self, key: &str) -> Option<&ReadingListEntry> {
        self.iter().map(|(_, entry)| entry).find(|e| e.book.key == key)
    }

    /// All entries in list order, each paired with its list.
    pub fn iter(&self) -> impl Iterator<Item = (ReadingList, &ReadingListEntry)> {
        ReadingList::ALL
            .into_iter()
            .flat_map(move |list| self.get(list).iter().map(move |entry| (list, entry)))
    }

    /// Total number of entries across all lists.
    pub fn total(&self) -> usize {
        ReadingList::ALL.iter().map(|list| self.get(*list).len()).sum()
    }

    /// Whether all three lists are empty.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Restore the one-list-per-key invariant on loaded data.
    ///
    /// For each key the entry with the latest `added_at` survives; on a tie
    /// the one appearing later in list order wins. Returns the number of
    /// entries dropped.
    pub fn normalize(&mut self) -> usize {
        let mut winners: HashMap<String, (ReadingList, usize, i64)> = HashMap::new();
        for list in ReadingList::ALL {
            for (position, entry) in self.get(list).iter().enumerate() {
                let candidate = (list, position, entry.added_at);
                winners
                    .entry(entry.book.key.clone())
                    .and_modify(|current| {
                        if entry.added_at >= current.2 {
                            *current = candidate;
                        }
                    })
                    .or_insert(candidate);
            }
        }

        let before = self.total();
        for list in ReadingList::ALL {
            let mut position = 0;
            self.get_mut(list).retain(|entry| {
                let keep = winners
                    .get(&entry.book.key)
                    .is_some_and(|(l, p, _)| *l == list && *p == position);
                position += 1;
                keep
            });
        }
        before - self.total()
    }
}

/// Favorited records, unique by key, in the order they were favorited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites(Vec<FavoriteEntry>);

impl Favorites {
    /// Add `book` if absent, remove it if present. Returns whether it is a
    /// favorite afterwards.
    pub fn toggle(&mut self, book: BookRecord, favorited_at: i64) -> bool {
        let before = self.0.len();
        self.0.retain(|entry| entry.book.key != book.key);
        if self.0.len() != before {
            return false;
        }
        self.0.push(FavoriteEntry { book, favorited_at });
        true
    }

    /// Whether `key` is a favorite.
    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|entry| entry.book.key == key)
    }

    /// The entry for `key`.
    pub fn find(&self, key: &str) -> Option<&FavoriteEntry> {
        self.0.iter().find(|entry| entry.book.key == key)
    }

    /// Entries in favorited order.
    pub fn as_slice(&self) -> &[FavoriteEntry] {
        &self.0
    }

    /// Number of favorites.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no favorites.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drop repeated keys from loaded data, keeping the first. Returns the
    /// number of entries dropped.
    pub fn normalize(&mut self) -> usize {
        let before = self.0.len();
        let mut seen = HashSet::new();
        self.0.retain(|entry| seen.insert(entry.book.key.clone()));
        before - self.0.len()
    }
}

/// Recently submitted queries, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentSearches(Vec<RecentSearch>);

impl RecentSearches {
    /// Move `query` to the front with a fresh timestamp, keeping at most
    /// [`MAX_RECENT_SEARCHES`] entries. Blank queries are ignored; returns
    /// whether the log changed.
    pub fn record(&mut self, query: &str, timestamp: i64) -> bool {
        if query.trim().is_empty() {
            return false;
        }
        self.0.retain(|entry| entry.query != query);
        self.0.insert(
            0,
            RecentSearch {
                query: query.to_string(),
                timestamp,
            },
        );
        self.0.truncate(MAX_RECENT_SEARCHES);
        true
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Entries, most recent first.
    pub fn as_slice(&self) -> &[RecentSearch] {
        &self.0
    }

    /// Query texts, most recent first.
    pub fn queries(&self) -> Vec<&str> {
        self.0.iter().map(|entry| entry.query.as_str()).collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Enforce uniqueness and the size bound on loaded data. Returns the
    /// number of entries dropped.
    pub fn normalize(&mut self) -> usize {
        let before = self.0.len();
        let mut seen = HashSet::new();
        self.0.retain(|entry| seen.insert(entry.query.clone()));
        self.0.truncate(MAX_RECENT_SEARCHES);
        before - self.0.len()
    }
}

/// Every persisted value at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub reading_lists: ReadingLists,
    pub favorites: Favorites,
    pub recent_searches: RecentSearches,
    pub view_mode: ViewMode,
    pub theme: Theme,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(key: &str) -> BookRecord {
        BookRecord::new(key, format!("Title of {key}"))
    }

    fn entry(key: &str, added_at: i64) -> ReadingListEntry {
        ReadingListEntry {
            book: book(key),
            added_at,
        }
    }

    #[test]
    fn test_assign_moves_between_lists() {
        let mut lists = ReadingLists::default();
        lists.assign(book("/works/OL1W"), ReadingList::WantToRead, 1);
        lists.assign(book("/works/OL1W"), ReadingList::Completed, 2);

        assert!(lists.get(ReadingList::WantToRead).is_empty());
        assert_eq!(lists.get(ReadingList::Completed).len(), 1);
        assert_eq!(lists.get(ReadingList::Completed)[0].added_at, 2);
        assert_eq!(
            lists.membership("/works/OL1W"),
            Some(ReadingList::Completed)
        );
    }

    #[test]
    fn test_assign_same_list_moves_to_end() {
        let mut lists = ReadingLists::default();
        lists.assign(book("a"), ReadingList::WantToRead, 1);
        lists.assign(book("b"), ReadingList::WantToRead, 2);
        lists.assign(book("a"), ReadingList::WantToRead, 3);

        let keys: Vec<_> = lists
            .get(ReadingList::WantToRead)
            .iter()
            .map(|e| e.book.key.as_str())
            .collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn test_remove_only_touches_named_list() {
        let mut lists = ReadingLists::default();
        lists.assign(book("a"), ReadingList::CurrentlyReading, 1);

        assert!(!lists.remove("a", ReadingList::WantToRead));
        assert_eq!(lists.total(), 1);

        assert!(lists.remove("a", ReadingList::CurrentlyReading));
        assert!(lists.is_empty());
        assert_eq!(lists.membership("a"), None);
    }

    #[test]
    fn test_iter_follows_list_order() {
        let mut lists = ReadingLists::default();
        lists.assign(book("c"), ReadingList::Completed, 1);
        lists.assign(book("w"), ReadingList::WantToRead, 2);
        lists.assign(book("r"), ReadingList::CurrentlyReading, 3);

        let order: Vec<_> = lists.iter().map(|(_, e)| e.book.key.as_str()).collect();
        assert_eq!(order, ["w", "r", "c"]);
        assert_eq!(lists.find("r").map(|e| e.added_at), Some(3));
    }

    #[test]
    fn test_normalize_keeps_latest_assignment() {
        let mut lists = ReadingLists {
            want_to_read: vec![entry("a", 10), entry("b", 1)],
            currently_reading: vec![entry("a", 20)],
            completed: vec![entry("b", 1)],
        };

        assert_eq!(lists.normalize(), 2);
        assert_eq!(lists.membership("a"), Some(ReadingList::CurrentlyReading));
        // Tie goes to the later list
        assert_eq!(lists.membership("b"), Some(ReadingList::Completed));
        assert_eq!(lists.total(), 2);
    }

    #[test]
    fn test_reading_lists_json_shape() {
        let mut lists = ReadingLists::default();
        lists.assign(book("a"), ReadingList::WantToRead, 5);

        let json = serde_json::to_value(&lists).unwrap();
        assert_eq!(json["wantToRead"][0]["key"], "a");
        assert_eq!(json["wantToRead"][0]["addedAt"], 5);
        assert_eq!(json["currentlyReading"], serde_json::json!([]));
        assert_eq!(json["completed"], serde_json::json!([]));
    }

    #[test]
    fn test_reading_lists_ignore_unknown_buckets() {
        let json = r#"{"wantToRead":[],"currentlyReading":[],"completed":[],"abandoned":[{"key":"x"}]}"#;
        let lists: ReadingLists = serde_json::from_str(json).unwrap();
        assert!(lists.is_empty());
    }

    #[test]
    fn test_favorites_toggle() {
        let mut favorites = Favorites::default();

        assert!(favorites.toggle(book("a"), 1));
        assert!(favorites.contains("a"));

        assert!(!favorites.toggle(book("a"), 2));
        assert!(!favorites.contains("a"));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_favorites_normalize() {
        let mut favorites: Favorites = serde_json::from_str(
            r#"[{"key":"a","favoritedAt":1},{"key":"b","favoritedAt":2},{"key":"a","favoritedAt":3}]"#,
        )
        .unwrap();

        assert_eq!(favorites.normalize(), 1);
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites.find("a").map(|e| e.favorited_at), Some(1));
    }

    #[test]
    fn test_recent_searches_move_to_front() {
        let mut log = RecentSearches::default();
        log.record("dune", 1);
        log.record("hobbit", 2);
        log.record("dune", 3);

        assert_eq!(log.queries(), ["dune", "hobbit"]);
        assert_eq!(log.as_slice()[0].timestamp, 3);
    }

    #[test]
    fn test_recent_searches_ignore_blank() {
        let mut log = RecentSearches::default();
        assert!(!log.record("", 1));
        assert!(!log.record("   \t", 2));
        assert!(log.is_empty());
    }

    #[test]
    fn test_recent_searches_are_case_sensitive() {
        let mut log = RecentSearches::default();
        log.record("Dune", 1);
        log.record("dune", 2);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_recent_searches_bound() {
        let mut log = RecentSearches::default();
        for i in 0..15 {
            log.record(&format!("query {i}"), i);
        }

        assert_eq!(log.len(), MAX_RECENT_SEARCHES);
        let expected: Vec<String> = (5..15).rev().map(|i| format!("query {i}")).collect();
        assert_eq!(log.queries(), expected);
    }

    #[test]
    fn test_recent_searches_normalize() {
        let mut entries: Vec<RecentSearch> = (0..12)
            .map(|i| RecentSearch {
                query: format!("q{i}"),
                timestamp: i,
            })
            .collect();
        entries.insert(1, entries[0].clone());
        let mut log = RecentSearches(entries);

        assert_eq!(log.normalize(), 3);
        assert_eq!(log.len(), MAX_RECENT_SEARCHES);
        assert_eq!(log.queries()[..2], ["q0", "q1"]);
    }

    #[test]
    fn test_snapshot_default() {
        let snapshot = StoreSnapshot::default();
        assert_eq!(snapshot.view_mode, ViewMode::Grid);
        assert_eq!(snapshot.theme, Theme::Light);
        assert!(snapshot.reading_lists.is_empty());
        assert!(snapshot.favorites.is_empty());
        assert!(snapshot.recent_searches.is_empty());
    }
}
