//! Render-agnostic aggregation output model
//!
//! The hand-off contract to presentation layers. Nothing in here knows
//! about charts or markup; downstream renderers decide how to draw a
//! payload (and whether to use an interactive backend).

use serde::Serialize;

/// Discriminator for the kind of summary a result carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsKind {
    /// Fixed-domain count buckets (e.g. ratings 1-10)
    Histogram,
    /// Ordered top-N selection by a derived metric
    Ranking,
    /// Label/value breakdown over an open category set
    Categorical,
    /// Ordered calendar-period series
    TimeSeries,
}

/// Render-agnostic payload of one aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsPayload {
    /// Ordered label → value pairs (genre/format/rating/ranking)
    Mapping(Vec<(String, f64)>),
    /// Ordered (period label, value) pairs (monthly time series)
    Series(Vec<(String, f64)>),
    /// Ordered (period label, per-group values) rows with a shared group
    /// legend (cour rating bands, watched/remaining splits)
    Grouped {
        groups: Vec<String>,
        rows: Vec<(String, Vec<f64>)>,
    },
    /// Explicit zero-qualifying-rows sentinel; never an error
    InsufficientData,
}

/// One tagged output unit of the engine.
#[derive(Debug, Clone, Serialize)]
pub struct AggregationResult {
    /// Human-readable title, e.g. "Monthwise Count"
    pub title: String,
    /// Kind discriminator
    pub kind: StatsKind,
    /// Render-agnostic payload
    pub payload: StatsPayload,
}

impl AggregationResult {
    /// Build a result carrying data.
    pub fn new(title: impl Into<String>, kind: StatsKind, payload: StatsPayload) -> Self {
        Self {
            title: title.into(),
            kind,
            payload,
        }
    }

    /// Build the insufficient-data sentinel for an aggregator.
    pub fn insufficient(title: impl Into<String>, kind: StatsKind) -> Self {
        Self {
            title: title.into(),
            kind,
            payload: StatsPayload::InsufficientData,
        }
    }

    /// Whether this result carries the insufficient-data sentinel.
    pub fn is_insufficient(&self) -> bool {
        matches!(self.payload, StatsPayload::InsufficientData)
    }
}
