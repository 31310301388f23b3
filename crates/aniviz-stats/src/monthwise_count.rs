//! Month-bucket apportionment of watched episodes
//!
//! The central algorithm: each record's [start, end] interval and episode
//! count become day-weighted contributions to month buckets. Intervals are
//! day-granular; the episode rate is `watched / days` and each touched
//! month is credited `trunc(rate * overlap_days)`, so the per-record
//! truncation loss is bounded by the number of touched months. Bucket
//! values are then normalized by the month's day count into an average
//! daily throughput, and the most recent 12 buckets are reported ascending.

use crate::aggregator::StatsAggregator;
use crate::calendar::MonthKey;
use crate::options::ChartOptions;
use crate::result::{AggregationResult, StatsKind, StatsPayload};
use aniviz_common::utils::round2;
use aniviz_common::{Result, WatchRecord};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// Number of month buckets shown in the presentation window.
const PRESENTED_MONTHS: usize = 12;

/// Aggregator for month-apportioned episode throughput.
#[derive(Debug, Default)]
pub struct MonthwiseCountAggregator;

impl MonthwiseCountAggregator {
    pub fn new() -> Self {
        Self
    }
}

/// Days of overlap between the half-open interval `[start, end)` and the
/// given month. Overlaps of all touched months sum to exactly `end - start`.
fn overlap_days(month: MonthKey, start: NaiveDate, end: NaiveDate) -> i64 {
    let month_start = month.first_day();
    let month_end = month.next().first_day();
    let lo = start.max(month_start);
    let hi = end.min(month_end);
    (hi - lo).num_days().max(0)
}

/// Credit one record's watched episodes to every month bucket its interval
/// touches.
fn apportion_record(
    buckets: &mut BTreeMap<MonthKey, u64>,
    record: &WatchRecord,
    today: NaiveDate,
) {
    let Some(start) = record.start_date else {
        return;
    };
    // An in-progress title apportions up to the evaluation instant; an
    // inverted interval is unusable and clamps to the minimum unit.
    let end = record.finish_date.unwrap_or(today).max(start);
    let days = (end - start).num_days().max(1);

    let start_month = MonthKey::from_date(start);
    let end_month = MonthKey::from_date(end);

    if start_month == end_month {
        // Exact case: no proration needed.
        *buckets.entry(start_month).or_insert(0) += u64::from(record.watched_episodes);
        return;
    }

    let rate = f64::from(record.watched_episodes) / days as f64;
    let mut month = start_month;
    loop {
        let overlap = overlap_days(month, start, end);
        if overlap > 0 {
            *buckets.entry(month).or_insert(0) += (rate * overlap as f64) as u64;
        }
        if month == end_month {
            break;
        }
        month = month.next();
    }
}

impl StatsAggregator for MonthwiseCountAggregator {
    fn name(&self) -> &'static str {
        "monthwise_count"
    }

    fn title(&self) -> &'static str {
        "Monthwise Count"
    }

    fn aggregate(
        &self,
        records: &[WatchRecord],
        _options: &ChartOptions,
        today: NaiveDate,
    ) -> Result<AggregationResult> {
        let mut buckets: BTreeMap<MonthKey, u64> = BTreeMap::new();
        for record in records {
            apportion_record(&mut buckets, record, today);
        }

        if buckets.is_empty() {
            return Ok(AggregationResult::insufficient(
                self.title(),
                StatsKind::TimeSeries,
            ));
        }

        // Normalize to average daily throughput; BTreeMap iteration is
        // already ascending by (year, month).
        let normalized: Vec<(String, f64)> = buckets
            .iter()
            .map(|(month, episodes)| {
                (
                    month.label(),
                    round2(*episodes as f64 / month.days_in_month() as f64),
                )
            })
            .collect();

        let skip = normalized.len().saturating_sub(PRESENTED_MONTHS);
        let series: Vec<(String, f64)> = normalized.into_iter().skip(skip).collect();

        debug!(buckets = series.len(), "built monthwise throughput series");
        Ok(AggregationResult::new(
            self.title(),
            StatsKind::TimeSeries,
            StatsPayload::Series(series),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{date, record};
    use proptest::prelude::*;

    const TODAY: &str = "2024-06-15";

    fn run(records: &[WatchRecord]) -> AggregationResult {
        MonthwiseCountAggregator::new()
            .aggregate(records, &ChartOptions::default(), date(TODAY))
            .unwrap()
    }

    fn raw_buckets(records: &[WatchRecord]) -> BTreeMap<MonthKey, u64> {
        let mut buckets = BTreeMap::new();
        for r in records {
            apportion_record(&mut buckets, r, date(TODAY));
        }
        buckets
    }

    #[test]
    fn single_month_record_credits_exactly_watched_episodes() {
        let records = vec![record(1)
            .episodes(10, 12)
            .start("2023-01-05")
            .finish("2023-01-20")
            .build()];
        let buckets = raw_buckets(&records);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[&MonthKey { year: 2023, month: 1 }], 10);
    }

    #[test]
    fn multi_month_credit_sum_is_within_truncation_bound() {
        let records = vec![record(1)
            .episodes(50, 50)
            .start("2023-01-10")
            .finish("2023-04-20")
            .build()];
        let buckets = raw_buckets(&records);
        assert_eq!(buckets.len(), 4, "touches Jan through Apr");
        let total: u64 = buckets.values().sum();
        let bound = buckets.len() as u64;
        assert!(total <= 50, "truncation never over-credits");
        assert!(total >= 50 - bound, "loss bounded by touched months");
    }

    #[test]
    fn example_end_to_end_buckets() {
        // Records 1 and 2 contribute to (2023, 1); record 3 has no start
        // date and participates in no time bucket.
        let records = vec![
            record(1)
                .episodes(10, 12)
                .start("2023-01-05")
                .finish("2023-01-20")
                .build(),
            record(2)
                .episodes(16, 24)
                .start("2023-01-25")
                .finish("2023-02-10")
                .build(),
            record(3).episodes(5, 12).build(),
        ];
        let buckets = raw_buckets(&records);
        let jan = MonthKey { year: 2023, month: 1 };
        let feb = MonthKey { year: 2023, month: 2 };

        // Record 2: 16 episodes over 16 days, 7 days in Jan and 9 in Feb.
        assert_eq!(buckets[&jan], 10 + 7);
        assert_eq!(buckets[&feb], 9);
        assert_eq!(buckets.len(), 2);
    }

    #[test]
    fn in_progress_records_apportion_up_to_today() {
        let records = vec![record(1)
            .episodes(30, 0)
            .start("2024-06-01")
            .build()];
        let buckets = raw_buckets(&records);
        // start and today share a month, so the exact case applies
        assert_eq!(buckets[&MonthKey { year: 2024, month: 6 }], 30);
    }

    #[test]
    fn inverted_interval_clamps_to_start_month() {
        let records = vec![record(1)
            .episodes(8, 8)
            .start("2023-05-10")
            .finish("2023-04-01")
            .build()];
        let buckets = raw_buckets(&records);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[&MonthKey { year: 2023, month: 5 }], 8);
    }

    #[test]
    fn presentation_trims_to_latest_twelve_months() {
        // Touches 15 months: presentation keeps the latest 12 in
        // ascending order, but every touched month is apportioned.
        let records = vec![record(1)
            .episodes(140, 140)
            .start("2022-01-15")
            .finish("2023-03-10")
            .build()];
        let result = run(&records);
        let StatsPayload::Series(series) = result.payload else {
            panic!("expected series payload");
        };
        assert_eq!(series.len(), 12);
        assert_eq!(series.first().unwrap().0, "Apr 2022");
        assert_eq!(series.last().unwrap().0, "Mar 2023");
    }

    #[test]
    fn normalizes_by_days_in_month() {
        let records = vec![record(1)
            .episodes(31, 31)
            .start("2023-01-01")
            .finish("2023-01-31")
            .build()];
        let result = run(&records);
        let StatsPayload::Series(series) = result.payload else {
            panic!("expected series payload");
        };
        assert_eq!(series, vec![("Jan 2023".to_string(), 1.0)]);
    }

    #[test]
    fn no_dated_records_is_insufficient_data() {
        let records = vec![record(1).build(), record(2).build()];
        assert!(run(&records).is_insufficient());
        assert!(run(&[]).is_insufficient());
    }

    proptest! {
        #[test]
        fn truncation_bound_holds_for_arbitrary_intervals(
            watched in 0u32..1000,
            start_offset in 0i64..1500,
            span in 0i64..1500,
        ) {
            let start = date("2020-01-01") + chrono::Duration::days(start_offset);
            let finish = start + chrono::Duration::days(span);
            let r = record(1)
                .episodes(watched, watched)
                .start(&start.format("%Y-%m-%d").to_string())
                .finish(&finish.format("%Y-%m-%d").to_string())
                .build();

            let buckets = raw_buckets(&[r]);
            let total: u64 = buckets.values().sum();
            let touched = buckets.len() as u64;
            prop_assert!(total <= u64::from(watched));
            prop_assert!(u64::from(watched) - total <= touched.max(1));
        }
    }
}
