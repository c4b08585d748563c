//! In-memory cache of search responses.
//!
//! A page fetched for a request is reused for identical requests until it
//! goes stale. Entries are dropped entirely once they pass the eviction age.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::query::{SearchPage, SearchRequest};

/// Cache timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long a cached page is served without refetching.
    pub stale_after: Duration,
    /// How long an unused page is kept at all.
    pub evict_after: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_after: Duration::from_secs(5 * 60),
            evict_after: Duration::from_secs(10 * 60),
        }
    }
}

impl CacheConfig {
    /// A configuration that never serves from cache.
    pub fn disabled() -> Self {
        Self {
            stale_after: Duration::ZERO,
            evict_after: Duration::ZERO,
        }
    }
}

/// Search pages keyed by request.
#[derive(Debug, Default)]
pub struct ResponseCache {
    config: CacheConfig,
    entries: Mutex<HashMap<SearchRequest, (Instant, SearchPage)>>,
}

impl ResponseCache {
    /// Create an empty cache.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// The timing this cache was created with.
    pub fn config(&self) -> CacheConfig {
        self.config
    }

    /// A fresh page for `request`, if one is cached.
    pub fn get(&self, request: &SearchRequest) -> Option<SearchPage> {
        let mut entries = self.lock();
        self.evict(&mut entries);

        let (fetched_at, page) = entries.get(request)?;
        if fetched_at.elapsed() < self.config.stale_after {
            debug!("Cache hit for {:?} page {}", request.compose_query(), request.page);
            Some(page.clone())
        } else {
            None
        }
    }

    /// Remember `page` as the response to `request`.
    pub fn insert(&self, request: SearchRequest, page: SearchPage) {
        if self.config.evict_after.is_zero() {
            return;
        }
        let mut entries = self.lock();
        self.evict(&mut entries);
        entries.insert(request, (Instant::now(), page));
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop everything.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn evict(&self, entries: &mut HashMap<SearchRequest, (Instant, SearchPage)>) {
        let evict_after = self.config.evict_after;
        entries.retain(|_, (fetched_at, _)| fetched_at.elapsed() < evict_after);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SearchRequest, (Instant, SearchPage)>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
