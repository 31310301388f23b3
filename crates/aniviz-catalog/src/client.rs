//! Catalog API client with retry logic
//!
//! Reference [`GenreLookup`] implementation against a MyAnimeList-compatible
//! catalog API: `GET <base_url>/anime/{id}?fields=genres` authenticated via
//! the `X-MAL-CLIENT-ID` header. Server errors and connection failures are
//! retried with exponential backoff; client errors are not. A 404 resolves
//! to [`LookupOutcome::NotFound`] rather than an error.

use crate::lookup::{GenreLookup, LookupOutcome};
use aniviz_common::{genres, AniVizError, CatalogId, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};
use tracing::{debug, instrument, warn};

/// Configuration for the catalog API client
#[derive(Debug, Clone)]
pub struct CatalogClientConfig {
    /// Base URL of the catalog API (e.g. "https://api.myanimelist.net/v2")
    pub base_url: String,
    /// Client id sent with every request
    pub client_id: String,
    /// Request timeout in seconds (default: 10)
    pub timeout_seconds: u64,
    /// Maximum number of retry attempts (default: 3)
    pub max_retries: usize,
}

impl Default for CatalogClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.myanimelist.net/v2".to_string(),
            client_id: String::new(),
            timeout_seconds: 10,
            max_retries: 3,
        }
    }
}

impl CatalogClientConfig {
    /// Create a new configuration with the minimum required parameters
    pub fn new(base_url: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client_id: client_id.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the maximum retry attempts
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Whether a failed request attempt may be retried.
///
/// Transport-level failures and 5xx responses are transient; 4xx responses
/// are definitive and retrying them only burns the backoff budget.
fn should_retry(error: &AniVizError) -> bool {
    match error {
        AniVizError::Catalog {
            status_code: Some(code),
            ..
        } => *code >= 500,
        other => other.is_network(),
    }
}

/// Catalog API response for an anime detail request
#[derive(Debug, Deserialize)]
struct AnimeDetail {
    #[allow(dead_code)]
    id: u64,
    title: String,
    #[serde(default)]
    genres: Vec<GenreEntry>,
}

#[derive(Debug, Deserialize)]
struct GenreEntry {
    name: String,
}

/// Catalog API client with connection pooling and retry logic
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    config: CatalogClientConfig,
}

impl CatalogClient {
    /// Create a new catalog client with the given configuration
    pub fn new(config: CatalogClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AniVizError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self { client, config })
    }

    fn detail_url(&self, id: CatalogId) -> String {
        format!(
            "{}/anime/{}?fields=genres",
            self.config.base_url.trim_end_matches('/'),
            id
        )
    }

    /// Fetch the detail payload for one title, retrying transient failures.
    #[instrument(skip(self), fields(id = %id))]
    async fn fetch_detail(&self, id: CatalogId) -> Result<Option<AnimeDetail>> {
        let url = self.detail_url(id);
        debug!("Fetching catalog detail from: {}", url);

        let retry_strategy = ExponentialBackoff::from_millis(100)
            .max_delay(Duration::from_secs(10))
            .take(self.config.max_retries);

        let action = || async {
            let request = self
                .client
                .get(&url)
                .header("X-MAL-CLIENT-ID", &self.config.client_id);

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() || status == StatusCode::NOT_FOUND {
                        Ok(response)
                    } else if status.is_client_error() {
                        // Don't retry client errors (4xx)
                        Err(AniVizError::catalog_with_status(
                            format!("API returned client error: {status}"),
                            status.as_u16(),
                        ))
                    } else {
                        // Retry server errors (5xx)
                        warn!("Server error, will retry: {}", status);
                        Err(AniVizError::catalog_with_status(
                            format!("API returned server error: {status}"),
                            status.as_u16(),
                        ))
                    }
                }
                Err(e) if e.is_timeout() => {
                    warn!("Request timeout, will retry: {}", e);
                    Err(AniVizError::network_with_source("Request timeout", e))
                }
                Err(e) if e.is_connect() => {
                    warn!("Connection error, will retry: {}", e);
                    Err(AniVizError::network_with_source("Connection error", e))
                }
                Err(e) => Err(AniVizError::network_with_source("Request failed", e)),
            }
        };

        let response = RetryIf::spawn(retry_strategy, action, should_retry).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let detail = response
            .json::<AnimeDetail>()
            .await
            .map_err(|e| AniVizError::network_with_source("Failed to parse catalog response", e))?;
        Ok(Some(detail))
    }
}

#[async_trait]
impl GenreLookup for CatalogClient {
    async fn lookup(&self, id: CatalogId) -> Result<LookupOutcome> {
        match self.fetch_detail(id).await? {
            Some(detail) => {
                let genre_names: Vec<String> = detail
                    .genres
                    .into_iter()
                    .map(|g| g.name)
                    .filter(|name| genres::is_known(name))
                    .collect();
                debug!(id = %id, title = %detail.title, count = genre_names.len(), "resolved genres");
                Ok(LookupOutcome::Found {
                    title: detail.title,
                    genres: genre_names,
                })
            }
            None => {
                debug!(id = %id, "catalog has no entry");
                Ok(LookupOutcome::NotFound)
            }
        }
    }
}
