//! Aggregator trait definition

use crate::options::ChartOptions;
use crate::result::AggregationResult;
use aniviz_common::{Result, WatchRecord};
use chrono::NaiveDate;

/// One independent statistics pass over the enriched record set.
///
/// Aggregators are pure computation: shared immutable access to the
/// records, no suspension points, no shared mutable state, so the manager
/// may run them concurrently. `today` is the evaluation instant for
/// in-progress intervals; passing it explicitly keeps aggregation
/// deterministic and testable.
pub trait StatsAggregator: Send + Sync {
    /// Stable machine name of this aggregator.
    fn name(&self) -> &'static str;

    /// Human-readable result title.
    fn title(&self) -> &'static str;

    /// Build this aggregator's summary.
    ///
    /// Zero qualifying rows is not an error: implementations return the
    /// insufficient-data sentinel. An `Err` marks an unexpected condition
    /// and causes the manager to omit (only) this result.
    fn aggregate(
        &self,
        records: &[WatchRecord],
        options: &ChartOptions,
        today: NaiveDate,
    ) -> Result<AggregationResult>;
}
