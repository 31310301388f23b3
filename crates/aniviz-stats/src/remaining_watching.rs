//! Remaining episodes for in-progress titles
//!
//! For every record currently being watched, reports watched episodes next
//! to the episodes still outstanding. Titles with an unknown total report
//! zero remaining rather than guessing.

use crate::aggregator::StatsAggregator;
use crate::options::ChartOptions;
use crate::result::{AggregationResult, StatsKind, StatsPayload};
use aniviz_common::utils::truncate_title;
use aniviz_common::{Result, WatchRecord, WatchStatus};
use chrono::NaiveDate;

const LABEL_WIDTH: usize = 15;

/// Aggregator for the remaining-episodes breakdown of in-progress titles.
#[derive(Debug, Default)]
pub struct RemainingWatchingAggregator;

impl RemainingWatchingAggregator {
    pub fn new() -> Self {
        Self
    }
}

impl StatsAggregator for RemainingWatchingAggregator {
    fn name(&self) -> &'static str {
        "remaining_watching"
    }

    fn title(&self) -> &'static str {
        "Remaining Watching"
    }

    fn aggregate(
        &self,
        records: &[WatchRecord],
        _options: &ChartOptions,
        _today: NaiveDate,
    ) -> Result<AggregationResult> {
        let rows: Vec<(String, Vec<f64>)> = records
            .iter()
            .filter(|r| r.status == WatchStatus::Watching)
            .map(|r| {
                let remaining = r.total_episodes.saturating_sub(r.watched_episodes);
                (
                    truncate_title(&r.title, LABEL_WIDTH),
                    vec![f64::from(r.watched_episodes), f64::from(remaining)],
                )
            })
            .collect();

        if rows.is_empty() {
            return Ok(AggregationResult::insufficient(
                self.title(),
                StatsKind::Categorical,
            ));
        }

        Ok(AggregationResult::new(
            self.title(),
            StatsKind::Categorical,
            StatsPayload::Grouped {
                groups: vec!["Watched".to_string(), "Remaining".to_string()],
                rows,
            },
        ))
    }
}
