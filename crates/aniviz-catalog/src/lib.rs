//! Genre lookup and enrichment for aniviz
//!
//! This crate owns the external side of the pipeline: the [`GenreLookup`]
//! contract, a reqwest-based catalog API client implementing it, a bounded
//! response cache, and the bounded-concurrency enrichment fan-out that
//! attaches genres to watch records.

pub mod cache;
pub mod client;
pub mod enricher;
pub mod lookup;

pub use cache::GenreCache;
pub use client::{CatalogClient, CatalogClientConfig};
pub use enricher::{enrich_records, EnrichmentLimits};
pub use lookup::{GenreLookup, LookupOutcome};
