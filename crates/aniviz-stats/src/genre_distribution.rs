//! Genre occurrence distribution
//!
//! Counts genre occurrences across all enriched records, pre-filtered
//! through the shared ignore policy (curator ignore set, plus the NSFW set
//! when suppression is enabled). Genres with zero surviving occurrences
//! are omitted, not zeroed.

use crate::aggregator::StatsAggregator;
use crate::options::ChartOptions;
use crate::result::{AggregationResult, StatsKind, StatsPayload};
use aniviz_common::{genres, Result, WatchRecord};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Aggregator for the genre occurrence distribution.
#[derive(Debug, Default)]
pub struct GenreDistributionAggregator;

impl GenreDistributionAggregator {
    pub fn new() -> Self {
        Self
    }
}

impl StatsAggregator for GenreDistributionAggregator {
    fn name(&self) -> &'static str {
        "genre_distribution"
    }

    fn title(&self) -> &'static str {
        "Genre Distribution"
    }

    fn aggregate(
        &self,
        records: &[WatchRecord],
        options: &ChartOptions,
        _today: NaiveDate,
    ) -> Result<AggregationResult> {
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for record in records {
            for genre in &record.genres {
                if genres::is_filtered(genre, options.disable_nsfw) {
                    continue;
                }
                *counts.entry(genre.as_str()).or_insert(0) += 1;
            }
        }

        if counts.is_empty() {
            return Ok(AggregationResult::insufficient(
                self.title(),
                StatsKind::Categorical,
            ));
        }

        // Count descending, name ascending for equal counts.
        let mut mapping: Vec<(String, f64)> = counts
            .into_iter()
            .map(|(genre, count)| (genre.to_string(), f64::from(count)))
            .collect();
        mapping.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        Ok(AggregationResult::new(
            self.title(),
            StatsKind::Categorical,
            StatsPayload::Mapping(mapping),
        ))
    }
}
