//! Catalog client for BookFinder.
//!
//! This crate talks to the Open Library search API and turns its documents
//! into [`BookRecord`](bookfinder_types::BookRecord)s.
//!
//! # Features
//!
//! - **Search**: free text combined with author and subject filters
//! - **Formatting**: cover URLs, first ISBN, capped subject lists
//! - **Year filtering**: client-side publication year ranges
//! - **Pagination**: page counts and a five-page navigation window
//! - **Caching**: identical searches are served from memory while fresh
//! - **Testing**: [`MockCatalog`] behind the [`CatalogService`] trait
//!
//! Requests are attempted once; failures are returned to the caller.
//!
//! # Quick Start
//!
//! ```no_run
//! use bookfinder_core::{CatalogClient, CatalogService, SearchRequest, YearFilter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new("https://openlibrary.org")?;
//!
//!     let request = SearchRequest::new("foundation").author("Asimov");
//!     let page = client.search(&request).await?;
//!
//!     let books = YearFilter::new(Some(1950), None).apply(page.records);
//!     println!("{} books since 1950", books.len());
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod client;
pub mod error;
pub mod filter;
pub mod format;
pub mod mock;
pub mod pagination;
pub mod query;
pub mod traits;

pub use cache::{CacheConfig, ResponseCache};
pub use client::{CatalogClient, DEFAULT_CATALOG_URL, DEFAULT_TIMEOUT};
pub use error::{Error, Result};
pub use filter::YearFilter;
pub use format::{CoverSize, SearchDoc, SearchResponse, cover_url, format_record};
pub use mock::MockCatalog;
pub use pagination::{page_window, total_pages};
pub use query::{DEFAULT_LIMIT, SearchPage, SearchRequest};
pub use traits::CatalogService;
