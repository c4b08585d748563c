//! Trait abstraction over the catalog.
//!
//! [`CatalogService`] lets callers work with the live Open Library client
//! or with [`MockCatalog`](crate::MockCatalog) in tests.

use async_trait::async_trait;

use bookfinder_types::BookRecord;

use crate::error::Result;
use crate::query::{SearchPage, SearchRequest};

/// Operations a book catalog provides.
///
/// # Example
///
/// ```ignore
/// use bookfinder_core::{CatalogService, Result, SearchRequest};
///
/// async fn print_titles<C: CatalogService>(catalog: &C) -> Result<()> {
///     let page = catalog.search(&SearchRequest::new("dune")).await?;
///     for book in page.records {
///         println!("{}", book.title);
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Run a search and return one page of formatted records.
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage>;

    /// Find the record for a catalog key, if the catalog knows it.
    async fn lookup(&self, key: &str) -> Result<Option<BookRecord>>;

    /// Like [`CatalogService::lookup`], but a missing record is an error.
    async fn require(&self, key: &str) -> Result<BookRecord> {
        self.lookup(key)
            .await?
            .ok_or_else(|| crate::Error::NotFound(key.to_string()))
    }
}
