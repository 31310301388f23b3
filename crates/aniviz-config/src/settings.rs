//! Application configuration structures

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Catalog API configuration
    #[validate(nested)]
    pub catalog: CatalogConfig,

    /// Genre enrichment configuration
    #[validate(nested)]
    pub enrichment: EnrichmentConfig,

    /// Chart/aggregation options
    #[validate(nested)]
    pub charts: ChartsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Catalog API configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog API base URL
    #[validate(url(message = "Catalog base URL must be a valid URL"))]
    pub base_url: String,

    /// API client id sent with every lookup; empty disables enrichment
    pub client_id: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300, message = "Timeout must be between 1 and 300 seconds"))]
    pub timeout_seconds: u64,

    /// Maximum number of retries for failed requests
    #[validate(range(max = 10, message = "Max retries cannot exceed 10"))]
    pub max_retries: u32,
}

/// Genre enrichment configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Maximum number of concurrent in-flight lookups
    #[validate(range(min = 1, max = 100, message = "Concurrency must be between 1 and 100"))]
    pub max_concurrency: usize,

    /// Per-lookup timeout in seconds
    #[validate(range(min = 1, max = 120, message = "Per-item timeout must be between 1 and 120 seconds"))]
    pub per_item_timeout_seconds: u64,

    /// Maximum number of cached lookup results
    #[validate(range(min = 1, message = "Cache capacity must be at least 1"))]
    pub cache_capacity: u64,
}

/// Chart/aggregation options
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartsConfig {
    /// Suppress explicit-content genres in category aggregations
    pub disable_nsfw: bool,

    /// Reserved: count not-yet-aired titles toward distributions.
    /// Declared for forward compatibility; not consulted yet.
    pub count_upcoming: bool,

    /// Renderer hint only; does not affect aggregation results
    pub interactive_charts: bool,

    /// Number of entries in the fastest-finished ranking
    #[validate(range(min = 1, max = 50, message = "top_n_fastest must be between 1 and 50"))]
    pub top_n_fastest: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            enrichment: EnrichmentConfig::default(),
            charts: ChartsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.myanimelist.net/v2".to_string(),
            client_id: String::new(),
            timeout_seconds: 10,
            max_retries: 3,
        }
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 25,
            per_item_timeout_seconds: 10,
            cache_capacity: 256,
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            disable_nsfw: true,
            count_upcoming: false,
            interactive_charts: false,
            top_n_fastest: 8,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
