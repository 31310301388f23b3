//! Statistics engine for aniviz watch records
//!
//! Consumes the enriched, immutable record set and produces independent
//! render-agnostic summaries: month-apportioned throughput, per-cour rating
//! bands, genre/format distributions, a rating histogram, a genre-average
//! rating table, a fastest-finished ranking, and a remaining-episodes view.
//! The [`StatsManager`] assembles them into a best-effort report.

pub mod aggregator;
pub mod calendar;
pub mod courwise_ratings;
pub mod fastest_finished;
pub mod format_distribution;
pub mod genre_distribution;
pub mod genre_ratings;
pub mod manager;
pub mod monthwise_count;
pub mod options;
pub mod ratings_curve;
pub mod remaining_watching;
pub mod result;

pub use aggregator::StatsAggregator;
pub use manager::StatsManager;
pub use options::ChartOptions;
pub use result::{AggregationResult, StatsKind, StatsPayload};

#[cfg(test)]
pub(crate) mod fixtures;
