//! Common types and utilities for the aniviz watch-history engine
//!
//! This crate provides the foundational pieces shared by the other
//! workspace crates: the application error type, the normalized
//! `WatchRecord` model with its raw-row normalizer, the curated genre
//! vocabularies, and small string/number helpers.

pub mod error;
pub mod genres;
pub mod record;
pub mod utils;

pub use error::{AniVizError, Result};
pub use record::{
    normalize_entries, CatalogId, MediaFormat, RawListEntry, RawListResponse, RawListStatus,
    RawNode, WatchRecord, WatchStatus,
};
