//! HTTP client for the Open Library catalog.
//!
//! # Example
//!
//! ```no_run
//! use bookfinder_core::{CatalogClient, CatalogService, SearchRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CatalogClient::new("https://openlibrary.org")?;
//!
//! let page = client.search(&SearchRequest::new("the hobbit")).await?;
//! println!("{} matches", page.total_count);
//! for book in &page.records {
//!     println!("{} by {}", book.title, book.author_line());
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use bookfinder_types::BookRecord;

use crate::cache::{CacheConfig, ResponseCache};
use crate::error::{Error, Result};
use crate::format::{SEARCH_FIELDS, SearchResponse, format_record};
use crate::query::{SearchPage, SearchRequest};
use crate::traits::CatalogService;

/// Public Open Library endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://openlibrary.org";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the catalog.
///
/// Each request is attempted once. Search pages are cached for identical
/// requests according to the client's [`CacheConfig`].
#[derive(Debug)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
    cache: ResponseCache,
}

fn normalize_base_url(base_url: &str) -> Result<String> {
    let base_url = base_url.trim_end_matches('/').to_string();

    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(Error::InvalidUrl(format!(
            "URL must start with http:// or https://, got: {}",
            base_url
        )));
    }
    Ok(base_url)
}

/// Single-result search for one work key. The key is always quoted, since a
/// bare leading `/` opens a regular expression in the query syntax.
fn lookup_request(key: &str) -> SearchRequest {
    let key = key.replace('"', "");
    SearchRequest::new(format!("key:\"{}\"", key)).limit(1)
}

impl CatalogClient {
    /// Create a client for the catalog at `base_url`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The catalog root (e.g., "https://openlibrary.org")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("bookfinder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Request)?;

        Self::with_client(base_url, client)
    }

    /// Create a client with a custom reqwest Client.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url)?,
            cache: ResponseCache::new(CacheConfig::default()),
        })
    }

    /// Replace the cache timing.
    #[must_use]
    pub fn with_cache(mut self, config: CacheConfig) -> Self {
        self.cache = ResponseCache::new(config);
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the search endpoint.
    pub fn search_url(&self) -> String {
        format!("{}/search.json", self.base_url)
    }

    /// Raw record of a work, e.g. `/works/OL45883W`.
    pub async fn work_details(&self, key: &str) -> Result<serde_json::Value> {
        let key = if key.starts_with('/') {
            key.to_string()
        } else {
            format!("/{}", key)
        };
        let url = format!("{}{}.json", self.base_url, key);
        debug!("Fetching work details from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::NotReachable {
                url: url.clone(),
                source: e,
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(key));
        }
        self.handle_response(response).await
    }

    async fn fetch_page(&self, request: &SearchRequest) -> Result<SearchPage> {
        let url = self.search_url();
        let query = request.compose_query();
        info!("Searching catalog for {:?} (page {})", query, request.page);

        let page_param = request.page.to_string();
        let limit_param = request.limit.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.as_str()),
                ("page", page_param.as_str()),
                ("limit", limit_param.as_str()),
                ("fields", SEARCH_FIELDS),
            ])
            .send()
            .await
            .map_err(|e| Error::NotReachable {
                url: url.clone(),
                source: e,
            })?;

        let body: SearchResponse = self.handle_response(response).await?;
        debug!(
            "Catalog returned {} of {} matches",
            body.docs.len(),
            body.num_found
        );

        Ok(SearchPage {
            total_count: body.num_found,
            page: request.page,
            limit: request.limit,
            records: body.docs.into_iter().map(format_record).collect(),
        })
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(Error::Request)
        } else {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or_else(|| status.to_string());

            Err(Error::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl CatalogService for CatalogClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
        if request.is_empty() {
            return Err(Error::EmptyQuery);
        }
        if let Some(page) = self.cache.get(request) {
            return Ok(page);
        }

        let page = self.fetch_page(request).await?;
        self.cache.insert(request.clone(), page.clone());
        Ok(page)
    }

    async fn lookup(&self, key: &str) -> Result<Option<BookRecord>> {
        let page = self.search(&lookup_request(key)).await?;
        Ok(page.records.into_iter().find(|b| b.key == key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = CatalogClient::new(DEFAULT_CATALOG_URL);
        assert!(client.is_ok());

        let client = client.unwrap();
        assert_eq!(client.base_url(), "https://openlibrary.org");
    }

    #[test]
    fn test_client_normalizes_url() {
        let client = CatalogClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(
            client.search_url(),
            "http://localhost:8080/search.json"
        );
    }

    #[test]
    fn test_lookup_request_quotes_key() {
        let request = lookup_request("/works/OL45883W");
        assert_eq!(request.compose_query(), "key:\"/works/OL45883W\"");
        assert_eq!(request.limit, 1);

        let request = lookup_request("/works/\"OL1W");
        assert_eq!(request.compose_query(), "key:\"/works/OL1W\"");
    }

    #[test]
    fn test_client_invalid_url() {
        let result = CatalogClient::new("openlibrary.org");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_empty_search_is_rejected_before_network() {
        let client = CatalogClient::new("http://127.0.0.1:9").unwrap();
        let result = client.search(&SearchRequest::default()).await;
        assert!(matches!(result, Err(Error::EmptyQuery)));
    }

    #[tokio::test]
    async fn test_unreachable_catalog() {
        let client = CatalogClient::with_timeout("http://127.0.0.1:9", Duration::from_secs(2))
            .unwrap()
            .with_cache(CacheConfig::disabled());
        let result = client.search(&SearchRequest::new("dune")).await;
        assert!(matches!(result, Err(Error::NotReachable { .. })));
    }
}
