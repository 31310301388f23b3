//! Per-cour rating band percentages
//!
//! Coarser, rating-only companion to the month apportionment: records are
//! grouped by the cour of their start date (no proration across cours) and
//! partitioned by score into three fixed bands. Each band is reported as a
//! percentage of the cour's rated-and-started total; cours with zero
//! qualifying records are omitted entirely.

use crate::aggregator::StatsAggregator;
use crate::calendar::Cour;
use crate::options::ChartOptions;
use crate::result::{AggregationResult, StatsKind, StatsPayload};
use aniviz_common::utils::round2;
use aniviz_common::{Result, WatchRecord};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Score bands: Bad [1,4], Average [5,7], Good [8,10].
const BAND_NAMES: [&str; 3] = ["Bad", "Average", "Good"];

/// Aggregator for per-cour rating band percentages.
#[derive(Debug, Default)]
pub struct CourwiseRatingsAggregator;

impl CourwiseRatingsAggregator {
    pub fn new() -> Self {
        Self
    }
}

fn band_index(score: u8) -> Option<usize> {
    match score {
        1..=4 => Some(0),
        5..=7 => Some(1),
        8..=10 => Some(2),
        _ => None, // unrated records belong to no band
    }
}

impl StatsAggregator for CourwiseRatingsAggregator {
    fn name(&self) -> &'static str {
        "courwise_ratings"
    }

    fn title(&self) -> &'static str {
        "Courwise Ratings"
    }

    fn aggregate(
        &self,
        records: &[WatchRecord],
        _options: &ChartOptions,
        _today: NaiveDate,
    ) -> Result<AggregationResult> {
        let mut bands: BTreeMap<Cour, [u32; 3]> = BTreeMap::new();

        for record in records {
            let Some(start) = record.start_date else {
                continue;
            };
            let Some(band) = band_index(record.score) else {
                continue;
            };
            bands.entry(Cour::from_date(start)).or_insert([0; 3])[band] += 1;
        }

        if bands.is_empty() {
            return Ok(AggregationResult::insufficient(
                self.title(),
                StatsKind::Categorical,
            ));
        }

        let rows: Vec<(String, Vec<f64>)> = bands
            .iter()
            .map(|(cour, counts)| {
                let total: u32 = counts.iter().sum();
                let percentages = counts
                    .iter()
                    .map(|&c| round2(f64::from(c) / f64::from(total) * 100.0))
                    .collect();
                (cour.label(), percentages)
            })
            .collect();

        Ok(AggregationResult::new(
            self.title(),
            StatsKind::Categorical,
            StatsPayload::Grouped {
                groups: BAND_NAMES.iter().map(|s| s.to_string()).collect(),
                rows,
            },
        ))
    }
}
