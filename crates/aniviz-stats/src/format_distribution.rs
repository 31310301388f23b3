//! Format distribution
//!
//! Per-record counts keyed by release format. Formats {PV, Music, Unknown}
//! are excluded unconditionally (not narrative content). Exclusion is
//! otherwise genre-driven even though the tally key is the format: a record
//! only counts if at least one of its genres survives the shared ignore
//! policy, so unenriched records never reach the tally.

use crate::aggregator::StatsAggregator;
use crate::options::ChartOptions;
use crate::result::{AggregationResult, StatsKind, StatsPayload};
use aniviz_common::{genres, MediaFormat, Result, WatchRecord};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Aggregator for the format distribution.
#[derive(Debug, Default)]
pub struct FormatDistributionAggregator;

impl FormatDistributionAggregator {
    pub fn new() -> Self {
        Self
    }
}

/// Formats that never enter the tally.
fn is_excluded_format(format: MediaFormat) -> bool {
    matches!(
        format,
        MediaFormat::Pv | MediaFormat::Music | MediaFormat::Unknown
    )
}

impl StatsAggregator for FormatDistributionAggregator {
    fn name(&self) -> &'static str {
        "format_distribution"
    }

    fn title(&self) -> &'static str {
        "Format Distribution"
    }

    fn aggregate(
        &self,
        records: &[WatchRecord],
        options: &ChartOptions,
        _today: NaiveDate,
    ) -> Result<AggregationResult> {
        let mut counts: HashMap<&'static str, u32> = HashMap::new();
        for record in records {
            if is_excluded_format(record.format) {
                continue;
            }
            let any_surviving_genre = record
                .genres
                .iter()
                .any(|g| !genres::is_filtered(g, options.disable_nsfw));
            if !any_surviving_genre {
                continue;
            }
            *counts.entry(record.format.label()).or_insert(0) += 1;
        }

        if counts.is_empty() {
            return Ok(AggregationResult::insufficient(
                self.title(),
                StatsKind::Categorical,
            ));
        }

        let mut mapping: Vec<(String, f64)> = counts
            .into_iter()
            .map(|(format, count)| (format.to_string(), f64::from(count)))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{date, record};
    use aniviz_common::MediaFormat;

    fn run(records: &[WatchRecord]) -> AggregationResult {
        FormatDistributionAggregator::new()
            .aggregate(records, &ChartOptions::default(), date("2024-06-15"))
            .unwrap()
    }

    #[test]
    fn counts_each_record_once_by_format() {
        let records = vec![
            record(1).format(MediaFormat::Tv).genres(&["Action", "Comedy"]).build(),
            record(2).format(MediaFormat::Tv).genres(&["Drama"]).build(),
            record(3).format(MediaFormat::Movie).genres(&["Action"]).build(),
        ];
        let result = run(&records);
        let StatsPayload::Mapping(mapping) = &result.payload else {
            panic!("expected mapping payload");
        };
        assert_eq!(
            *mapping,
            vec![("TV".to_string(), 2.0), ("Movie".to_string(), 1.0)]
        );
    }

    #[test]
    fn non_narrative_formats_are_always_excluded() {
        let records = vec![
            record(1).format(MediaFormat::Pv).genres(&["Action"]).build(),
            record(2).format(MediaFormat::Music).genres(&["Action"]).build(),
            record(3).format(MediaFormat::Unknown).genres(&["Action"]).build(),
        ];
        assert!(run(&records).is_insufficient());
    }

    #[test]
    fn record_is_excluded_when_all_genres_are_filtered() {
        let records = vec![
            record(1).format(MediaFormat::Tv).genres(&["Ecchi"]).build(),
            record(2).format(MediaFormat::Tv).build(), // unenriched
            record(3).format(MediaFormat::Movie).genres(&["Ecchi", "Romance"]).build(),
        ];
        let result = run(&records);
        let StatsPayload::Mapping(mapping) = &result.payload else {
            panic!("expected mapping payload");
        };
        // Only the movie carries a surviving genre.
        assert_eq!(*mapping, vec![("Movie".to_string(), 1.0)]);
    }
}
