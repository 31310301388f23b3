//! Curated genre vocabularies and filter predicates
//!
//! The known-genre list mirrors the catalog's main genre taxonomy; anything
//! outside it (themes, demographics, per-title tags) is discarded during
//! enrichment so the distributions stay comparable across lists.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Genres recognised by the engine. Lookup results are filtered to this set.
pub const KNOWN_GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Comedy",
    "Drama",
    "Fantasy",
    "Gourmet",
    "Horror",
    "Isekai",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Slice of Life",
    "Sports",
    "Suspense",
    "Erotica",
    "Ecchi",
    "Hentai",
];

/// Explicit-content genres, suppressed when `disable_nsfw` is set.
pub const NSFW_GENRES: &[&str] = &["Erotica", "Ecchi", "Hentai"];

/// Curator genres considered non-informative for distributions.
pub const IGNORE_GENRES: &[&str] = &["Avant Garde", "Award Winning"];

static KNOWN: Lazy<HashSet<&'static str>> = Lazy::new(|| KNOWN_GENRES.iter().copied().collect());

/// Whether a genre name belongs to the recognised vocabulary.
pub fn is_known(genre: &str) -> bool {
    KNOWN.contains(genre)
}

/// Whether a genre is in the fixed explicit-content set.
pub fn is_nsfw(genre: &str) -> bool {
    NSFW_GENRES.contains(&genre)
}

/// Whether a genre should be excluded from category aggregations.
///
/// Always excludes the curator ignore set; additionally excludes the NSFW
/// set when `disable_nsfw` is true.
pub fn is_filtered(genre: &str, disable_nsfw: bool) -> bool {
    IGNORE_GENRES.contains(&genre) || (disable_nsfw && is_nsfw(genre))
}
