//! Genre lookup contract

use aniviz_common::{CatalogId, Result};
use async_trait::async_trait;

/// Outcome of a successfully completed catalog lookup.
///
/// "Not found" is a resolved outcome, not an error: it is cacheable and
/// degrades to an empty genre set during enrichment. Transport failures
/// surface as `Err` from [`GenreLookup::lookup`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The catalog knows the title
    Found {
        /// Canonical title according to the catalog
        title: String,
        /// Genres, filtered to the recognised vocabulary
        genres: Vec<String>,
    },
    /// The catalog has no entry for this id
    NotFound,
}

impl LookupOutcome {
    /// The genres carried by this outcome; empty for `NotFound`.
    pub fn into_genres(self) -> Vec<String> {
        match self {
            Self::Found { genres, .. } => genres,
            Self::NotFound => Vec::new(),
        }
    }
}

/// Capability to resolve a catalog id to genre metadata.
///
/// Implementations must be safely callable concurrently; expected worst-case
/// latency is in the tens of seconds, so callers wrap lookups in their own
/// timeouts.
#[async_trait]
pub trait GenreLookup: Send + Sync {
    /// Resolve one catalog id.
    async fn lookup(&self, id: CatalogId) -> Result<LookupOutcome>;
}
