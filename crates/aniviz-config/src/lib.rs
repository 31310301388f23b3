//! Configuration loading and validation for aniviz
//!
//! YAML-file based configuration with environment-variable overrides and
//! `validator`-backed schema validation.

pub mod loader;
pub mod settings;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{CatalogConfig, ChartsConfig, Config, EnrichmentConfig, LoggingConfig};
