//! Bounded response cache for genre lookups
//!
//! Once a catalog id has been resolved — including "not found after an
//! upstream query" — the result is served from here for the rest of the
//! process lifetime instead of re-querying. Transient failures (timeouts,
//! network errors) are never cached. Backed by a `moka` future cache, which
//! is safe for concurrent read/update from in-flight lookups and evicts
//! least-recently-used entries past `max_capacity`.

use aniviz_common::{AniVizError, CatalogId};
use moka::future::Cache;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// Bounded concurrent cache of resolved genre sets keyed by catalog id.
#[derive(Debug, Clone)]
pub struct GenreCache {
    inner: Cache<CatalogId, Arc<Vec<String>>>,
}

impl GenreCache {
    /// Create a cache holding at most `max_capacity` resolved entries.
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Look up a previously resolved genre set.
    pub async fn get(&self, id: CatalogId) -> Option<Arc<Vec<String>>> {
        let hit = self.inner.get(&id).await;
        if hit.is_some() {
            debug!(id = %id, "genre cache hit");
        }
        hit
    }

    /// Record a resolved genre set (possibly empty, for not-found titles).
    pub async fn insert(&self, id: CatalogId, genres: Vec<String>) -> Arc<Vec<String>> {
        let genres = Arc::new(genres);
        self.inner.insert(id, Arc::clone(&genres)).await;
        genres
    }

    /// Serve `id` from the cache, running `resolve` on a miss.
    ///
    /// Concurrent callers for the same id share one `resolve` run; the
    /// others wait for its outcome instead of issuing their own upstream
    /// lookup. `Ok` outcomes are cached, `Err` outcomes are returned to
    /// every waiter and left uncached.
    pub async fn get_or_resolve<F>(
        &self,
        id: CatalogId,
        resolve: F,
    ) -> Result<Arc<Vec<String>>, Arc<AniVizError>>
    where
        F: Future<Output = Result<Vec<String>, AniVizError>>,
    {
        self.inner
            .try_get_with(id, async move { resolve.await.map(Arc::new) })
            .await
    }

    /// Number of currently cached entries.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Synchronize pending cache maintenance; useful in tests.
    pub async fn sync(&self) {
        self.inner.run_pending_tasks().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn caches_resolved_entries() {
        let cache = GenreCache::new(16);
        assert!(cache.get(CatalogId(1)).await.is_none());

        cache
            .insert(CatalogId(1), vec!["Action".to_string()])
            .await;
        let hit = cache.get(CatalogId(1)).await.expect("entry cached");
        assert_eq!(hit.as_slice(), ["Action".to_string()]);
    }

    #[tokio::test]
    async fn caches_not_found_as_empty_set() {
        let cache = GenreCache::new(16);
        cache.insert(CatalogId(404), Vec::new()).await;
        let hit = cache.get(CatalogId(404)).await.expect("negative entry cached");
        assert!(hit.is_empty());
    }

    #[tokio::test]
    async fn resolve_errors_are_not_cached() {
        let cache = GenreCache::new(16);
        let err = cache
            .get_or_resolve(CatalogId(1), async { Err(AniVizError::network("upstream down")) })
            .await
            .unwrap_err();
        assert!(err.is_network());

        // The failed resolution left no entry, so the next attempt runs.
        let hit = cache
            .get_or_resolve(CatalogId(1), async { Ok(vec!["Action".to_string()]) })
            .await
            .unwrap();
        assert_eq!(hit.as_slice(), ["Action".to_string()]);
        assert!(cache.get(CatalogId(1)).await.is_some());
    }

    #[tokio::test]
    async fn evicts_past_capacity() {
        let cache = GenreCache::new(2);
        for id in 0..10u64 {
            cache.insert(CatalogId(id), vec![format!("G{id}")]).await;
        }
        cache.sync().await;
        assert!(cache.entry_count() <= 2);
    }
}
