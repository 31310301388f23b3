//! Genre-average rating table
//!
//! Mean user score per genre over rated records that are actually being
//! (or have been) watched. NSFW genres are collected during the pass and
//! removed only after the map is built; the post-filter (as opposed to the
//! genre distribution's pre-filter) is a deliberate contract carried over
//! from the historical behavior.

use crate::aggregator::StatsAggregator;
use crate::options::ChartOptions;
use crate::result::{AggregationResult, StatsKind, StatsPayload};
use aniviz_common::utils::round2;
use aniviz_common::{genres, Result, WatchRecord, WatchStatus};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Aggregator for mean score per genre.
#[derive(Debug, Default)]
pub struct GenreRatingsAggregator;

impl GenreRatingsAggregator {
    pub fn new() -> Self {
        Self
    }
}

impl StatsAggregator for GenreRatingsAggregator {
    fn name(&self) -> &'static str {
        "genre_ratings"
    }

    fn title(&self) -> &'static str {
        "Genrewise Ratings"
    }

    fn aggregate(
        &self,
        records: &[WatchRecord],
        options: &ChartOptions,
        _today: NaiveDate,
    ) -> Result<AggregationResult> {
        let mut scores: HashMap<&str, Vec<u8>> = HashMap::new();
        for record in records {
            if record.status == WatchStatus::PlanToWatch || !record.is_rated() {
                continue;
            }
            for genre in &record.genres {
                scores.entry(genre.as_str()).or_default().push(record.score);
            }
        }

        // Post-filter: NSFW genres are dropped after collection.
        if options.disable_nsfw {
            scores.retain(|genre, _| !genres::is_nsfw(genre));
        }

        if scores.is_empty() {
            return Ok(AggregationResult::insufficient(
                self.title(),
                StatsKind::Categorical,
            ));
        }

        // Mean ascending, name ascending for equal means.
        let mut mapping: Vec<(String, f64)> = scores
            .into_iter()
            .map(|(genre, values)| {
                let sum: u32 = values.iter().map(|&s| u32::from(s)).sum();
                let mean = f64::from(sum) / values.len() as f64;
                (genre.to_string(), round2(mean))
            })
            .collect();
        mapping.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{date, record};

    fn run(records: &[WatchRecord], disable_nsfw: bool) -> AggregationResult {
        let options = ChartOptions {
            disable_nsfw,
            ..ChartOptions::default()
        };
        GenreRatingsAggregator::new()
            .aggregate(records, &options, date("2024-06-15"))
            .unwrap()
    }

    #[test]
    fn reports_means_sorted_ascending() {
        let records = vec![
            record(1).score(8).genres(&["Action", "Drama"]).build(),
            record(2).score(5).genres(&["Action"]).build(),
            record(3).score(10).genres(&["Romance"]).build(),
        ];
        let result = run(&records, true);
        let StatsPayload::Mapping(mapping) = &result.payload else {
            panic!("expected mapping payload");
        };
        assert_eq!(
            *mapping,
            vec![
                ("Action".to_string(), 6.5),
                ("Drama".to_string(), 8.0),
                ("Romance".to_string(), 10.0),
            ]
        );
    }

    #[test]
    fn plan_to_watch_and_unrated_records_are_excluded() {
        let records = vec![
            record(1)
                .status(WatchStatus::PlanToWatch)
                .score(10)
                .genres(&["Action"])
                .build(),
            record(2).score(0).genres(&["Action"]).build(),
        ];
        assert!(run(&records, true).is_insufficient());
    }

    #[test]
    fn nsfw_genres_are_dropped_after_aggregation() {
        let records = vec![
            record(1).score(9).genres(&["Ecchi", "Comedy"]).build(),
            record(2).score(3).genres(&["Ecchi"]).build(),
        ];

        let suppressed = run(&records, true);
        let StatsPayload::Mapping(mapping) = &suppressed.payload else {
            panic!("expected mapping payload");
        };
        assert_eq!(*mapping, vec![("Comedy".to_string(), 9.0)]);

        let unsuppressed = run(&records, false);
        let StatsPayload::Mapping(mapping) = &unsuppressed.payload else {
            panic!("expected mapping payload");
        };
        assert_eq!(
            *mapping,
            vec![("Ecchi".to_string(), 6.0), ("Comedy".to_string(), 9.0)]
        );
    }
}
