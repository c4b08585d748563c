//! Mock catalog implementation for testing.
//!
//! [`MockCatalog`] implements [`CatalogService`] over an in-memory list of
//! records, so search flows can be exercised without network access.
//!
//! # Features
//!
//! - **Failure injection**: make every request fail with a given message
//! - **Latency simulation**: delay responses to exercise slow paths
//! - **Request counting**: check how many requests reached the catalog

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use bookfinder_types::BookRecord;

use crate::error::{Error, Result};
use crate::query::{SearchPage, SearchRequest};
use crate::traits::CatalogService;

/// An in-memory catalog for testing.
///
/// # Example
///
/// ```
/// use bookfinder_core::{CatalogService, MockCatalog, SearchRequest};
/// use bookfinder_types::BookRecord;
///
/// #[tokio::main]
/// async fn main() {
///     let catalog = MockCatalog::with_records(vec![
///         BookRecord::new("/works/OL1W", "Dune"),
///     ]);
///
///     let page = catalog.search(&SearchRequest::new("dune")).await.unwrap();
///     assert_eq!(page.total_count, 1);
/// }
/// ```
#[derive(Debug, Default)]
pub struct MockCatalog {
    records: RwLock<Vec<BookRecord>>,
    should_fail: AtomicBool,
    fail_message: RwLock<String>,
    latency_ms: AtomicU64,
    request_count: AtomicU32,
}

impl MockCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding `records`.
    pub fn with_records(records: Vec<BookRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            ..Default::default()
        }
    }

    /// Add records.
    pub async fn add_records(&self, records: Vec<BookRecord>) {
        self.records.write().await.extend(records);
    }

    /// Make every following request fail (or succeed again).
    pub async fn set_should_fail(&self, fail: bool, message: Option<&str>) {
        self.should_fail.store(fail, Ordering::Relaxed);
        if let Some(msg) = message {
            *self.fail_message.write().await = msg.to_string();
        }
    }

    /// Delay every response by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::Relaxed);
    }

    /// Number of requests served, including failed ones.
    pub fn request_count(&self) -> u32 {
        self.request_count.load(Ordering::Relaxed)
    }

    async fn begin_request(&self) -> Result<()> {
        self.request_count.fetch_add(1, Ordering::Relaxed);

        let latency = self.latency_ms.load(Ordering::Relaxed);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }

        if self.should_fail.load(Ordering::Relaxed) {
            let message = self.fail_message.read().await.clone();
            return Err(Error::Api {
                status: 503,
                message: if message.is_empty() {
                    "Mock failure".to_string()
                } else {
                    message
                },
            });
        }
        Ok(())
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches(book: &BookRecord, request: &SearchRequest) -> bool {
    let query = request.query.trim();
    if !query.is_empty()
        && !query
            .split_whitespace()
            .all(|word| contains_ci(&book.title, word) || contains_ci(&book.author_line(), word))
    {
        return false;
    }

    let author = request.author.trim();
    if !author.is_empty() && !book.authors.iter().any(|a| contains_ci(a, author)) {
        return false;
    }

    let subject = request.subject.trim();
    if !subject.is_empty() && !book.subjects.iter().any(|s| contains_ci(s, subject)) {
        return false;
    }

    true
}

#[async_trait]
impl CatalogService for MockCatalog {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
        if request.is_empty() {
            return Err(Error::EmptyQuery);
        }
        self.begin_request().await?;

        let records = self.records.read().await;
        let hits: Vec<&BookRecord> = records.iter().filter(|b| matches(b, request)).collect();

        let skip = (request.page.saturating_sub(1) as usize).saturating_mul(request.limit as usize);
        let page = hits
            .iter()
            .skip(skip)
            .take(request.limit as usize)
            .map(|b| (*b).clone())
            .collect();

        Ok(SearchPage {
            total_count: hits.len() as u64,
            page: request.page,
            limit: request.limit,
            records: page,
        })
    }

    async fn lookup(&self, key: &str) -> Result<Option<BookRecord>> {
        self.begin_request().await?;
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|b| b.key == key)
            .cloned())
    }
}
