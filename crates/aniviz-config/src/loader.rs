//! Configuration loading utilities

use crate::Config;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use validator::Validate;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading the configuration file
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for aniviz_common::AniVizError {
    fn from(err: ConfigError) -> Self {
        aniviz_common::AniVizError::config(err.to_string())
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment overrides.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate()?;

        debug!(path = %path.as_ref().display(), "loaded configuration file");
        Ok(config)
    }

    /// Load configuration from the conventional locations.
    ///
    /// Tries `ANIVIZ_CONFIG_PATH`, then `config.yaml` / `config.yml` in the
    /// working directory, and finally falls back to built-in defaults with
    /// environment overrides applied.
    pub fn load() -> Result<Config, ConfigError> {
        if let Ok(path) = env::var("ANIVIZ_CONFIG_PATH") {
            return Self::load_from_file(path);
        }
        for candidate in ["config.yaml", "config.yml"] {
            if Path::new(candidate).exists() {
                return Self::load_from_file(candidate);
            }
        }

        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides to a configuration.
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        if let Ok(client_id) = env::var("ANIVIZ_CLIENT_ID") {
            config.catalog.client_id = client_id;
        }

        if let Ok(value) = env::var("ANIVIZ_DISABLE_NSFW") {
            config.charts.disable_nsfw = Self::parse_env("ANIVIZ_DISABLE_NSFW", &value)?;
        }

        if let Ok(value) = env::var("ANIVIZ_MAX_CONCURRENCY") {
            config.enrichment.max_concurrency = Self::parse_env("ANIVIZ_MAX_CONCURRENCY", &value)?;
        }

        if let Ok(level) = env::var("ANIVIZ_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }

    fn parse_env<T>(var: &str, value: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        value.parse().map_err(|e| ConfigError::EnvParse {
            var: var.to_string(),
            source: Box::new(e),
        })
    }
}
