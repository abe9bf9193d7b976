//! Caching layer for plate lookups.
//!
//! Results for the same normalized query and language are identical for a
//! while, so repeated lookups (e.g. toggling language back and forth, or
//! retyping a plate after a clear) are served from memory. Failures are never
//! cached.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::api::ApiError;
use crate::domain::{Language, MatchSet, PlateQuery};
use crate::engine::LookupService;

/// Cache key for lookups: (normalized query, language).
type LookupKey = (PlateQuery, Language);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Lookup service with caching.
///
/// Wraps any [`LookupService`] and remembers successful answers.
pub struct CachedLookup<L> {
    inner: L,
    entries: MokaCache<LookupKey, MatchSet>,
}

impl<L: LookupService> CachedLookup<L> {
    /// Create a new cached lookup.
    pub fn new(inner: L, config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, entries }
    }

    /// Access the wrapped service for calls that bypass the cache.
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Number of cached entries (approximate until pending tasks run).
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}

impl<L: LookupService> LookupService for CachedLookup<L> {
    async fn lookup(&self, query: &PlateQuery, language: Language) -> Result<MatchSet, ApiError> {
        let key = (query.clone(), language);

        if let Some(cached) = self.entries.get(&key).await {
            trace!(%query, %language, "lookup cache hit");
            return Ok(cached);
        }

        let set = self.inner.lookup(query, language).await?;
        self.entries.insert(key, set.clone()).await;
        Ok(set)
    }
}
