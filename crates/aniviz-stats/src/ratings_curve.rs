//! Score histogram over the fixed 1..=10 domain
//!
//! Every score in the domain is reported even when its count is zero, so
//! the curve's shape is comparable across lists.

use crate::aggregator::StatsAggregator;
use crate::options::ChartOptions;
use crate::result::{AggregationResult, StatsKind, StatsPayload};
use aniviz_common::{Result, WatchRecord};
use chrono::NaiveDate;

/// Aggregator for the score histogram.
#[derive(Debug, Default)]
pub struct RatingsCurveAggregator;

impl RatingsCurveAggregator {
    pub fn new() -> Self {
        Self
    }
}

impl StatsAggregator for RatingsCurveAggregator {
    fn name(&self) -> &'static str {
        "ratings_curve"
    }

    fn title(&self) -> &'static str {
        "Ratings Curve"
    }

    fn aggregate(
        &self,
        records: &[WatchRecord],
        _options: &ChartOptions,
        _today: NaiveDate,
    ) -> Result<AggregationResult> {
        let mut counts = [0u32; 10];
        for record in records {
            if let score @ 1..=10 = record.score {
                counts[usize::from(score) - 1] += 1;
            }
        }

        if counts.iter().all(|&c| c == 0) {
            return Ok(AggregationResult::insufficient(
                self.title(),
                StatsKind::Histogram,
            ));
        }

        let mapping: Vec<(String, f64)> = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| ((i + 1).to_string(), f64::from(count)))
            .collect();

        Ok(AggregationResult::new(
            self.title(),
            StatsKind::Histogram,
            StatsPayload::Mapping(mapping),
        ))
    }
}
