//! Statistics report orchestration
//!
//! Runs every registered aggregator over a shared snapshot of the
//! normalized records and assembles the report in registration order. A
//! failing or panicking aggregator is logged and omitted; it never takes
//! the rest of the report down with it.

use crate::aggregator::StatsAggregator;
use crate::courwise_ratings::CourwiseRatingsAggregator;
use crate::fastest_finished::FastestFinishedAggregator;
use crate::format_distribution::FormatDistributionAggregator;
use crate::genre_distribution::GenreDistributionAggregator;
use crate::genre_ratings::GenreRatingsAggregator;
use crate::monthwise_count::MonthwiseCountAggregator;
use crate::options::ChartOptions;
use crate::ratings_curve::RatingsCurveAggregator;
use crate::remaining_watching::RemainingWatchingAggregator;
use crate::result::AggregationResult;
use aniviz_common::WatchRecord;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Coordinates all statistics aggregators.
pub struct StatsManager {
    aggregators: Vec<Arc<dyn StatsAggregator>>,
    options: ChartOptions,
}

impl StatsManager {
    /// Creates a manager with the full default aggregator set.
    pub fn new(options: ChartOptions) -> Self {
        let aggregators: Vec<Arc<dyn StatsAggregator>> = vec![
            Arc::new(MonthwiseCountAggregator::new()),
            Arc::new(GenreDistributionAggregator::new()),
            Arc::new(GenreRatingsAggregator::new()),
            Arc::new(FormatDistributionAggregator::new()),
            Arc::new(RatingsCurveAggregator::new()),
            Arc::new(CourwiseRatingsAggregator::new()),
            Arc::new(FastestFinishedAggregator::new()),
            Arc::new(RemainingWatchingAggregator::new()),
        ];
        Self {
            aggregators,
            options,
        }
    }

    /// Creates a manager with an explicit aggregator set.
    pub fn with_aggregators(
        aggregators: Vec<Arc<dyn StatsAggregator>>,
        options: ChartOptions,
    ) -> Self {
        Self {
            aggregators,
            options,
        }
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Runs every aggregator over the record snapshot and returns the
    /// report in registration order.
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub async fn build_report(
        &self,
        records: Arc<Vec<WatchRecord>>,
        today: NaiveDate,
    ) -> Vec<AggregationResult> {
        info!(
            aggregators = self.aggregators.len(),
            "building statistics report"
        );

        let mut handles = Vec::with_capacity(self.aggregators.len());
        for aggregator in &self.aggregators {
            let aggregator = Arc::clone(aggregator);
            let records = Arc::clone(&records);
            let options = self.options.clone();
            handles.push((
                aggregator.name(),
                tokio::task::spawn_blocking(move || {
                    aggregator.aggregate(&records, &options, today)
                }),
            ));
        }

        let mut report = Vec::with_capacity(handles.len());
        for (name, handle) in handles {
            match handle.await {
                Ok(Ok(result)) => {
                    debug!(aggregator = name, "aggregation complete");
                    report.push(result);
                }
                Ok(Err(e)) => {
                    error!(aggregator = name, error = %e, "aggregation failed");
                }
                Err(e) => {
                    error!(aggregator = name, error = %e, "aggregation task panicked");
                }
            }
        }

        info!(results = report.len(), "statistics report complete");
        report
    }
}

impl Default for StatsManager {
    fn default() -> Self {
        Self::new(ChartOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{date, record};
    use crate::result::{StatsKind, StatsPayload};
    use aniviz_common::{AniVizError, Result};

    #[tokio::test]
    async fn empty_input_yields_all_insufficient() {
        let manager = StatsManager::default();
        let report = manager.build_report(Arc::new(Vec::new()), date("2024-06-15")).await;
        assert_eq!(report.len(), 8);
        assert!(report.iter().all(|r| r.is_insufficient()));
    }

    #[tokio::test]
    async fn report_preserves_registration_order() {
        let manager = StatsManager::default();
        let records = vec![record(1)
            .genres(&["Action"])
            .start("2024-05-01")
            .finish("2024-05-20")
            .build()];
        let report = manager.build_report(Arc::new(records), date("2024-06-15")).await;
        let titles: Vec<&str> = report.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Monthwise Count",
                "Genre Distribution",
                "Genrewise Ratings",
                "Format Distribution",
                "Ratings Curve",
                "Courwise Ratings",
                "Fastest Finished",
                "Remaining Watching",
            ]
        );
    }

    struct FailingAggregator;

    impl StatsAggregator for FailingAggregator {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn title(&self) -> &'static str {
            "Failing"
        }

        fn aggregate(
            &self,
            _records: &[WatchRecord],
            _options: &ChartOptions,
            _today: NaiveDate,
        ) -> Result<AggregationResult> {
            Err(AniVizError::aggregation("synthetic failure"))
        }
    }

    struct PanickingAggregator;

    impl StatsAggregator for PanickingAggregator {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn title(&self) -> &'static str {
            "Panicking"
        }

        fn aggregate(
            &self,
            _records: &[WatchRecord],
            _options: &ChartOptions,
            _today: NaiveDate,
        ) -> Result<AggregationResult> {
            panic!("synthetic panic");
        }
    }

    struct OkAggregator;

    impl StatsAggregator for OkAggregator {
        fn name(&self) -> &'static str {
            "ok"
        }

        fn title(&self) -> &'static str {
            "Ok"
        }

        fn aggregate(
            &self,
            _records: &[WatchRecord],
            _options: &ChartOptions,
            _today: NaiveDate,
        ) -> Result<AggregationResult> {
            Ok(AggregationResult::new(
                self.title(),
                StatsKind::Categorical,
                StatsPayload::Mapping(vec![("x".to_string(), 1.0)]),
            ))
        }
    }

    #[tokio::test]
    async fn failures_and_panics_are_isolated() {
        let manager = StatsManager::with_aggregators(
            vec![
                Arc::new(FailingAggregator),
                Arc::new(PanickingAggregator),
                Arc::new(OkAggregator),
            ],
            ChartOptions::default(),
        );
        let report = manager.build_report(Arc::new(Vec::new()), date("2024-06-15")).await;
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].title, "Ok");
    }
}
