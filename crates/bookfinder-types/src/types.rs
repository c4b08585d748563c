//! Core types for BookFinder data.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ParseError;

/// Maximum number of subjects kept on a formatted [`BookRecord`].
pub const MAX_SUBJECTS: usize = 10;

/// A bibliographic record from the catalog.
///
/// Only [`BookRecord::key`] carries meaning for personalization; everything
/// else is payload that is stored and displayed as-is. Fields this type does
/// not know about are kept in [`BookRecord::extra`] so records written by
/// other tools survive a load/save cycle unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    /// Unique catalog identifier (e.g. `/works/OL45883W`).
    pub key: String,
    /// Title of the work.
    #[serde(default)]
    pub title: String,
    /// Author names.
    #[serde(default)]
    pub authors: Vec<String>,
    /// Year of first publication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_publish_year: Option<i32>,
    /// First known ISBN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    /// Catalog cover image identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_id: Option<u64>,
    /// Cover image URL for list views.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url_small: Option<String>,
    /// Cover image URL for detail views.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url_large: Option<String>,
    /// Publisher names.
    #[serde(default)]
    pub publishers: Vec<String>,
    /// Language codes.
    #[serde(default)]
    pub languages: Vec<String>,
    /// Subjects, at most [`MAX_SUBJECTS`] when produced by the catalog client.
    #[serde(default)]
    pub subjects: Vec<String>,
    /// Number of known editions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition_count: Option<u32>,
    /// Median page count across editions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median_page_count: Option<u32>,
    /// Fields not modelled above, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BookRecord {
    /// Create a record with only a key and a title.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Create a builder for a record with the given key.
    pub fn builder(key: impl Into<String>) -> BookRecordBuilder {
        BookRecordBuilder {
            record: BookRecord {
                key: key.into(),
                ..Default::default()
            },
        }
    }

    /// Authors joined for display, or `"Unknown author"`.
    #[must_use]
    pub fn author_line(&self) -> String {
        if self.authors.is_empty() {
            "Unknown author".to_string()
        } else {
            self.authors.join(", ")
        }
    }
}

/// Builder for [`BookRecord`].
#[derive(Debug, Clone)]
#[must_use]
pub struct BookRecordBuilder {
    record: BookRecord,
}

impl BookRecordBuilder {
    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.record.title = title.into();
        self
    }

    /// Add an author.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.record.authors.push(author.into());
        self
    }

    /// Set the year of first publication.
    pub fn first_publish_year(mut self, year: i32) -> Self {
        self.record.first_publish_year = Some(year);
        self
    }

    /// Set the ISBN.
    pub fn isbn(mut self, isbn: impl Into<String>) -> Self {
        self.record.isbn = Some(isbn.into());
        self
    }

    /// Add a subject. Subjects beyond [`MAX_SUBJECTS`] are ignored.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        if self.record.subjects.len() < MAX_SUBJECTS {
            self.record.subjects.push(subject.into());
        }
        self
    }

    /// Set the edition count.
    pub fn edition_count(mut self, count: u32) -> Self {
        self.record.edition_count = Some(count);
        self
    }

    /// Build the record.
    #[must_use]
    pub fn build(self) -> BookRecord {
        self.record
    }
}

/// One of the three mutually exclusive reading lists.
///
/// Parsing accepts the persisted camelCase name as well as kebab-case and
/// snake_case spellings, case-insensitively:
///
/// ```
/// use bookfinder_types::ReadingList;
///
/// assert_eq!("wantToRead".parse::<ReadingList>(), Ok(ReadingList::WantToRead));
/// assert_eq!("currently-reading".parse::<ReadingList>(), Ok(ReadingList::CurrentlyReading));
/// assert_eq!("COMPLETED".parse::<ReadingList>(), Ok(ReadingList::Completed));
/// assert!("abandoned".parse::<ReadingList>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadingList {
    /// Books the user intends to read.
    WantToRead,
    /// Books in progress.
    CurrentlyReading,
    /// Finished books.
    Completed,
}

impl ReadingList {
    /// All reading lists in display and export order.
    pub const ALL: [ReadingList; 3] = [
        ReadingList::WantToRead,
        ReadingList::CurrentlyReading,
        ReadingList::Completed,
    ];

    /// Persisted name of the list.
    #[must_use]
    pub fn as_key(&self) -> &'static str {
        match self {
            ReadingList::WantToRead => "wantToRead",
            ReadingList::CurrentlyReading => "currentlyReading",
            ReadingList::Completed => "completed",
        }
    }
}

impl FromStr for ReadingList {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "wanttoread" => Ok(ReadingList::WantToRead),
            "currentlyreading" => Ok(ReadingList::CurrentlyReading),
            "completed" => Ok(ReadingList::Completed),
            _ => Err(ParseError::UnknownReadingList(s.to_string())),
        }
    }
}

impl fmt::Display for ReadingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadingList::WantToRead => write!(f, "Want to Read"),
            ReadingList::CurrentlyReading => write!(f, "Currently Reading"),
            ReadingList::Completed => write!(f, "Completed"),
        }
    }
}

/// How search results are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Compact multi-column layout.
    #[default]
    Grid,
    /// One detailed row per record.
    List,
}

impl FromStr for ViewMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            _ => Err(ParseError::UnknownViewMode(s.to_string())),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Grid => write!(f, "grid"),
            ViewMode::List => write!(f, "list"),
        }
    }
}

/// Visual theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ParseError::UnknownTheme(s.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// A record placed on a reading list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingListEntry {
    /// The catalog record.
    #[serde(flatten)]
    pub book: BookRecord,
    /// When the record was placed on its list (Unix milliseconds).
    #[serde(default)]
    pub added_at: i64,
}

/// A record marked as favorite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    /// The catalog record.
    #[serde(flatten)]
    pub book: BookRecord,
    /// When the record was favorited (Unix milliseconds).
    #[serde(default)]
    pub favorited_at: i64,
}

/// A previously submitted search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentSearch {
    /// Query text exactly as submitted.
    pub query: String,
    /// When the query was last submitted (Unix milliseconds).
    pub timestamp: i64,
}
