//! Aggregation options

/// Options to consider while building aggregations.
///
/// This is the engine-side mirror of the `charts` configuration section;
/// the caller maps its configuration into it.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    /// Suppress explicit-content genres in category aggregations
    pub disable_nsfw: bool,
    /// Reserved: count not-yet-aired titles toward distributions.
    /// Carried for forward compatibility; not consulted yet.
    pub count_upcoming: bool,
    /// Renderer hint only; never affects aggregation results
    pub interactive_charts: bool,
    /// Number of entries in the fastest-finished ranking
    pub top_n_fastest: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            disable_nsfw: true,
            count_upcoming: false,
            interactive_charts: false,
            top_n_fastest: 8,
        }
    }
}
