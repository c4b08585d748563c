//! Shared types for BookFinder.
//!
//! This crate provides the value types used by the catalog client
//! (bookfinder-core), the personalization store (bookfinder-store) and the
//! command-line front end.
//!
//! # Features
//!
//! - [`BookRecord`]: a catalog record, identified by its `key`
//! - [`ReadingList`]: the three mutually exclusive reading lists
//! - [`ViewMode`] and [`Theme`] preferences
//! - Timestamped entries as they are persisted
//!
//! # Example
//!
//! ```
//! use bookfinder_types::{BookRecord, ReadingList, Theme};
//!
//! let book = BookRecord::builder("/works/OL45883W")
//!     .title("The Hobbit")
//!     .author("J.R.R. Tolkien")
//!     .first_publish_year(1937)
//!     .build();
//!
//! assert_eq!(book.author_line(), "J.R.R. Tolkien");
//! assert_eq!(ReadingList::WantToRead.as_key(), "wantToRead");
//! assert_eq!(Theme::Light.toggled(), Theme::Dark);
//! ```

pub mod error;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{
    BookRecord, BookRecordBuilder, FavoriteEntry, MAX_SUBJECTS, ReadingList, ReadingListEntry,
    RecentSearch, Theme, ViewMode,
};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // --- BookRecord serialization tests ---

    #[test]
    fn test_book_record_uses_camel_case() {
        let book = BookRecord::builder("/works/OL1W")
            .title("Dune")
            .author("Frank Herbert")
            .first_publish_year(1965)
            .edition_count(120)
            .build();

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["key"], "/works/OL1W");
        assert_eq!(json["firstPublishYear"], 1965);
        assert_eq!(json["editionCount"], 120);
        assert!(json.get("isbn").is_none());
    }

    #[test]
    fn test_book_record_preserves_unknown_fields() {
        let json = r#"{"key":"/works/OL2W","title":"Emma","shelfNote":"signed copy"}"#;
        let book: BookRecord = serde_json::from_str(json).unwrap();

        assert_eq!(book.title, "Emma");
        assert_eq!(book.extra["shelfNote"], "signed copy");

        let back = serde_json::to_value(&book).unwrap();
        assert_eq!(back["shelfNote"], "signed copy");
    }

    #[test]
    fn test_book_record_requires_key() {
        let result: Result<BookRecord, _> = serde_json::from_str(r#"{"title":"No key"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_author_line() {
        let anonymous = BookRecord::new("/works/OL3W", "Beowulf");
        assert_eq!(anonymous.author_line(), "Unknown author");

        let coauthored = BookRecord::builder("/works/OL4W")
            .author("Terry Pratchett")
            .author("Neil Gaiman")
            .build();
        assert_eq!(coauthored.author_line(), "Terry Pratchett, Neil Gaiman");
    }

    #[test]
    fn test_builder_caps_subjects() {
        let mut builder = BookRecord::builder("/works/OL5W");
        for i in 0..15 {
            builder = builder.subject(format!("subject {i}"));
        }
        assert_eq!(builder.build().subjects.len(), MAX_SUBJECTS);
    }

    // --- Entry serialization tests ---

    #[test]
    fn test_reading_list_entry_flattens_record() {
        let entry = ReadingListEntry {
            book: BookRecord::new("/works/OL1W", "Dune"),
            added_at: 1_700_000_000_000,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["key"], "/works/OL1W");
        assert_eq!(json["addedAt"], 1_700_000_000_000_i64);
        assert!(json.get("book").is_none());

        let back: ReadingListEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
        assert!(back.book.extra.is_empty());
    }

    #[test]
    fn test_favorite_entry_timestamp_name() {
        let json = r#"{"key":"/works/OL9W","title":"Ulysses","favoritedAt":42}"#;
        let entry: FavoriteEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.favorited_at, 42);
        assert!(entry.book.extra.get("favoritedAt").is_none());
    }

    // --- Enum parsing tests ---

    #[test]
    fn test_reading_list_parse_spellings() {
        for name in ["wantToRead", "want-to-read", "want_to_read", "WANTTOREAD"] {
            assert_eq!(name.parse::<ReadingList>(), Ok(ReadingList::WantToRead));
        }
        assert_eq!(
            "currentlyReading".parse::<ReadingList>(),
            Ok(ReadingList::CurrentlyReading)
        );
    }

    #[test]
    fn test_reading_list_rejects_unknown() {
        let err = "abandoned".parse::<ReadingList>().unwrap_err();
        assert_eq!(err, ParseError::UnknownReadingList("abandoned".to_string()));
        assert!(err.to_string().contains("wantToRead"));
    }

    #[test]
    fn test_reading_list_serde_names() {
        assert_eq!(
            serde_json::to_string(&ReadingList::CurrentlyReading).unwrap(),
            "\"currentlyReading\""
        );
    }

    #[test]
    fn test_view_mode_and_theme_defaults() {
        assert_eq!(ViewMode::default(), ViewMode::Grid);
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(serde_json::to_string(&ViewMode::List).unwrap(), "\"list\"");
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    }

    #[test]
    fn test_view_mode_rejects_unknown() {
        assert!("tiles".parse::<ViewMode>().is_err());
        assert!(serde_json::from_str::<ViewMode>("\"tiles\"").is_err());
    }

    proptest! {
        #[test]
        fn prop_reading_list_display_key_roundtrip(index in 0usize..3) {
            let list = ReadingList::ALL[index];
            prop_assert_eq!(list.as_key().parse::<ReadingList>(), Ok(list));
        }

        #[test]
        fn prop_theme_toggle_is_involution(dark in any::<bool>()) {
            let theme = if dark { Theme::Dark } else { Theme::Light };
            prop_assert_eq!(theme.toggled().toggled(), theme);
            prop_assert_ne!(theme.toggled(), theme);
        }
    }
}
