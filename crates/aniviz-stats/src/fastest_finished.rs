//! Fastest-finished ranking
//!
//! Ranks completed records by episodes per day over their watch interval
//! and keeps the top N. Ties keep input order (stable sort), so a rerun on
//! the same list produces the same ranking.

use crate::aggregator::StatsAggregator;
use crate::options::ChartOptions;
use crate::result::{AggregationResult, StatsKind, StatsPayload};
use aniviz_common::utils::{round2, truncate_title};
use aniviz_common::{Result, WatchRecord, WatchStatus};
use chrono::NaiveDate;

/// Maximum label width in the ranking output.
const LABEL_WIDTH: usize = 15;

/// Aggregator for the fastest-finished ranking.
#[derive(Debug, Default)]
pub struct FastestFinishedAggregator;

impl FastestFinishedAggregator {
    pub fn new() -> Self {
        Self
    }
}

/// Episodes per day for a completed record, or None when the record does
/// not qualify for the ranking.
fn watch_speed(record: &WatchRecord) -> Option<f64> {
    if record.status != WatchStatus::Completed || record.watched_episodes == 0 {
        return None;
    }
    let start = record.start_date?;
    let finish = record.finish_date?;
    // Same-day completions count as a single day.
    let days = (finish - start).num_days().max(1);
    Some(f64::from(record.watched_episodes) / days as f64)
}

impl StatsAggregator for FastestFinishedAggregator {
    fn name(&self) -> &'static str {
        "fastest_finished"
    }

    fn title(&self) -> &'static str {
        "Fastest Finished"
    }

    fn aggregate(
        &self,
        records: &[WatchRecord],
        options: &ChartOptions,
        _today: NaiveDate,
    ) -> Result<AggregationResult> {
        let mut ranked: Vec<(&WatchRecord, f64)> = records
            .iter()
            .filter_map(|r| watch_speed(r).map(|speed| (r, speed)))
            .collect();

        if ranked.is_empty() {
            return Ok(AggregationResult::insufficient(
                self.title(),
                StatsKind::Ranking,
            ));
        }

        // Stable sort keeps input order among equal speeds.
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(options.top_n_fastest);

        let mapping: Vec<(String, f64)> = ranked
            .into_iter()
            .map(|(record, speed)| (truncate_title(&record.title, LABEL_WIDTH), round2(speed)))
            .collect();

        Ok(AggregationResult::new(
            self.title(),
            StatsKind::Ranking,
            StatsPayload::Mapping(mapping),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{date, record};

    fn run(records: &[WatchRecord], top_n: usize) -> AggregationResult {
        let options = ChartOptions {
            top_n_fastest: top_n,
            ..ChartOptions::default()
        };
        FastestFinishedAggregator::new()
            .aggregate(records, &options, date("2024-06-15"))
            .unwrap()
    }

    #[test]
    fn ranks_by_episodes_per_day() {
        let records = vec![
            record(1)
                .title("Slow")
                .episodes(12, 12)
                .start("2023-01-01")
                .finish("2023-01-25")
                .build(),
            record(2)
                .title("Fast")
                .episodes(24, 24)
                .start("2023-02-01")
                .finish("2023-02-04")
                .build(),
        ];
        let result = run(&records, 8);
        let StatsPayload::Mapping(mapping) = &result.payload else {
            panic!("expected mapping payload");
        };
        assert_eq!(
            *mapping,
            vec![("Fast".to_string(), 8.0), ("Slow".to_string(), 0.5)]
        );
    }

    #[test]
    fn ties_preserve_input_order() {
        // Speeds 2.0, 5.0, 1.0, 5.0 with top 2: both 5.0 entries survive,
        // earlier index first.
        let mk = |id: u64, title: &str, eps: u32| {
            record(id)
                .title(title)
                .episodes(eps, eps)
                .start("2023-03-01")
                .finish("2023-03-05")
                .build()
        };
        let records = vec![
            mk(1, "Two", 8),
            mk(2, "First Five", 20),
            mk(3, "One", 4),
            mk(4, "Second Five", 20),
        ];
        let result = run(&records, 2);
        let StatsPayload::Mapping(mapping) = &result.payload else {
            panic!("expected mapping payload");
        };
        assert_eq!(
            *mapping,
            vec![
                ("First Five".to_string(), 5.0),
                ("Second Five".to_string(), 5.0),
            ]
        );
    }

    #[test]
    fn same_day_completion_counts_one_day() {
        let records = vec![record(1)
            .episodes(3, 3)
            .start("2023-04-10")
            .finish("2023-04-10")
            .build()];
        let result = run(&records, 8);
        let StatsPayload::Mapping(mapping) = &result.payload else {
            panic!("expected mapping payload");
        };
        assert_eq!(mapping[0].1, 3.0);
    }

    #[test]
    fn long_titles_are_truncated_in_labels() {
        let records = vec![record(1)
            .title("A Very Long Title Indeed")
            .episodes(12, 12)
            .start("2023-01-01")
            .finish("2023-01-13")
            .build()];
        let result = run(&records, 8);
        let StatsPayload::Mapping(mapping) = &result.payload else {
            panic!("expected mapping payload");
        };
        assert_eq!(mapping[0].0, "A Very Long Tit...");
    }

    #[test]
    fn incomplete_or_undated_records_do_not_qualify() {
        let records = vec![
            record(1)
                .status(WatchStatus::Watching)
                .episodes(6, 12)
                .start("2023-01-01")
                .finish("2023-01-10")
                .build(),
            record(2).episodes(12, 12).start("2023-01-01").build(),
            record(3)
                .episodes(0, 12)
                .start("2023-01-01")
                .finish("2023-01-10")
                .build(),
        ];
        assert!(run(&records, 8).is_insufficient());
    }
}
