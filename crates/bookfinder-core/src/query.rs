//! Search requests.

use serde::{Deserialize, Serialize};

use bookfinder_types::BookRecord;

use crate::pagination;

/// Default number of records per page.
pub const DEFAULT_LIMIT: u32 = 20;

/// A catalog search.
///
/// Free text, author and subject are combined into one catalog query by
/// [`SearchRequest::compose_query`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query.
    pub query: String,
    /// Author filter.
    pub author: String,
    /// Subject filter.
    pub subject: String,
    /// 1-based page number.
    pub page: u32,
    /// Records per page.
    pub limit: u32,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            author: String::new(),
            subject: String::new(),
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SearchRequest {
    /// A first-page search for `query`.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Restrict to an author.
    #[must_use]
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Restrict to a subject.
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Select a page. Page 0 is treated as page 1.
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Set the page size. A limit of 0 is treated as 1.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// The catalog query string, e.g. `tolkien author:"J.R.R. Tolkien"`.
    ///
    /// Blank parts are left out.
    pub fn compose_query(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        let query = self.query.trim();
        if !query.is_empty() {
            parts.push(query.to_string());
        }
        let author = self.author.trim();
        if !author.is_empty() {
            parts.push(format!("author:\"{}\"", author));
        }
        let subject = self.subject.trim();
        if !subject.is_empty() {
            parts.push(format!("subject:\"{}\"", subject));
        }
        parts.join(" ")
    }

    /// Whether there is anything to search for.
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.author.trim().is_empty() && self.subject.trim().is_empty()
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    /// Matches across all pages.
    pub total_count: u64,
    /// Page number these records belong to.
    pub page: u32,
    /// Page size the search was made with.
    pub limit: u32,
    /// Records on this page.
    pub records: Vec<BookRecord>,
}

impl SearchPage {
    /// Number of pages the whole result set spans.
    pub fn total_pages(&self) -> u32 {
        pagination::total_pages(self.total_count, self.limit)
    }

    /// Page numbers to offer around the current page.
    pub fn page_window(&self) -> Vec<u32> {
        pagination::page_window(self.page, self.total_pages())
    }
}
