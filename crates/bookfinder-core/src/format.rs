//! Conversion of raw catalog documents into [`BookRecord`]s.

use serde::{Deserialize, Serialize};

use bookfinder_types::{BookRecord, MAX_SUBJECTS};

/// Base URL of the cover image service.
pub const COVERS_URL: &str = "https://covers.openlibrary.org";

/// Fields requested from the search endpoint.
pub const SEARCH_FIELDS: &str = "key,title,author_name,first_publish_year,isbn,cover_i,publisher,language,subject,edition_count,number_of_pages_median";

/// Cover image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverSize {
    Small,
    Medium,
    Large,
}

impl CoverSize {
    fn suffix(&self) -> char {
        match self {
            CoverSize::Small => 'S',
            CoverSize::Medium => 'M',
            CoverSize::Large => 'L',
        }
    }
}

/// URL of a cover image.
pub fn cover_url(cover_id: u64, size: CoverSize) -> String {
    format!("{}/b/id/{}-{}.jpg", COVERS_URL, cover_id, size.suffix())
}

/// One document of a search response, as the catalog sends it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchDoc {
    pub key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Vec<String>,
    #[serde(default)]
    pub first_publish_year: Option<i32>,
    #[serde(default)]
    pub isbn: Vec<String>,
    #[serde(default)]
    pub cover_i: Option<u64>,
    #[serde(default)]
    pub publisher: Vec<String>,
    #[serde(default)]
    pub language: Vec<String>,
    #[serde(default)]
    pub subject: Vec<String>,
    #[serde(default)]
    pub edition_count: Option<u32>,
    #[serde(default)]
    pub number_of_pages_median: Option<u32>,
}

/// Body of a search response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default, alias = "numFound")]
    pub num_found: u64,
    #[serde(default)]
    pub docs: Vec<SearchDoc>,
}

/// Normalize a catalog document.
///
/// Keeps the first ISBN, builds medium and large cover URLs, and caps
/// subjects at [`MAX_SUBJECTS`].
pub fn format_record(doc: SearchDoc) -> BookRecord {
    let mut subjects = doc.subject;
    subjects.truncate(MAX_SUBJECTS);

    BookRecord {
        key: doc.key,
        title: doc.title.unwrap_or_default(),
        authors: doc.author_name,
        first_publish_year: doc.first_publish_year,
        isbn: doc.isbn.into_iter().next(),
        cover_id: doc.cover_i,
        cover_image_url_small: doc.cover_i.map(|id| cover_url(id, CoverSize::Medium)),
        cover_image_url_large: doc.cover_i.map(|id| cover_url(id, CoverSize::Large)),
        publishers: doc.publisher,
        languages: doc.language,
        subjects,
        edition_count: doc.edition_count,
        median_page_count: doc.number_of_pages_median,
        extra: Default::default(),
    }
}
