//! Bounded-concurrency genre enrichment
//!
//! Fans one lookup per record out over a semaphore-bounded task set and
//! fans the results back in by record index, so each record receives the
//! genres of its own lookup regardless of completion order. Per-item
//! failures (timeout, not-found, upstream error, task panic) degrade to an
//! empty genre set; partial enrichment is a first-class success state and
//! the batch never aborts. The batch has no aggregate deadline — it settles
//! when every dispatched lookup has settled.

use crate::cache::GenreCache;
use crate::lookup::GenreLookup;
use aniviz_common::{AniVizError, CatalogId, WatchRecord};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, instrument, warn};

/// Resource limits for one enrichment batch.
#[derive(Debug, Clone)]
pub struct EnrichmentLimits {
    /// Upper bound on concurrent in-flight lookups; the effective bound is
    /// `min(records.len(), max_concurrency)`
    pub max_concurrency: usize,
    /// Timeout applied to each individual lookup
    pub per_item_timeout: Duration,
}

impl Default for EnrichmentLimits {
    fn default() -> Self {
        Self {
            max_concurrency: 25,
            per_item_timeout: Duration::from_secs(10),
        }
    }
}

/// Resolve one id through the cache, falling back to the lookup collaborator.
///
/// Only resolved outcomes (found or not-found) are written to the cache;
/// timeouts and transport errors are left uncached so a later batch can
/// retry them. Concurrent tasks resolving the same id share one upstream
/// lookup through the cache.
async fn resolve_genres(
    id: CatalogId,
    lookup: &dyn GenreLookup,
    cache: &GenreCache,
    per_item_timeout: Duration,
) -> Vec<String> {
    let resolved = cache
        .get_or_resolve(id, async {
            match tokio::time::timeout(per_item_timeout, lookup.lookup(id)).await {
                Ok(result) => result.map(|outcome| outcome.into_genres()),
                Err(_) => Err(AniVizError::network("genre lookup timed out")),
            }
        })
        .await;

    match resolved {
        Ok(genres) => genres.as_ref().clone(),
        Err(error) => {
            warn!(id = %id, %error, "genre lookup failed; continuing with empty genres");
            Vec::new()
        }
    }
}

/// Attach genre metadata to every record that needs it.
///
/// Consumes and returns the record vector; `genres` is the only field
/// written, exactly once per record. Records that already carry genres are
/// left untouched.
#[instrument(skip_all, fields(records = records.len()))]
pub async fn enrich_records(
    mut records: Vec<WatchRecord>,
    lookup: Arc<dyn GenreLookup>,
    cache: GenreCache,
    limits: &EnrichmentLimits,
) -> Vec<WatchRecord> {
    if records.is_empty() {
        return records;
    }

    let permits = limits.max_concurrency.min(records.len()).max(1);
    let semaphore = Arc::new(Semaphore::new(permits));
    let per_item_timeout = limits.per_item_timeout;

    let mut tasks: JoinSet<(usize, Vec<String>)> = JoinSet::new();
    for (index, record) in records.iter().enumerate() {
        if !record.genres.is_empty() {
            continue;
        }
        let id = record.catalog_id;
        let lookup = Arc::clone(&lookup);
        let cache = cache.clone();
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            // Closing the semaphore is never done here, so acquire can only
            // fail if the owner is dropped, which cannot outlive this task.
            let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
            let genres = resolve_genres(id, lookup.as_ref(), &cache, per_item_timeout).await;
            (index, genres)
        });
    }

    let mut enriched = 0usize;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, genres)) => {
                if !genres.is_empty() {
                    enriched += 1;
                }
                records[index].genres = genres;
            }
            Err(join_error) => {
                // A panicked lookup task loses only its own record's genres.
                warn!(%join_error, "enrichment task panicked; affected record keeps empty genres");
            }
        }
    }

    debug!(enriched, total = records.len(), "enrichment batch settled");
    records
}
