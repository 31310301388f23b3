//! aniviz - watch-history statistics engine

use anyhow::{Context, Result};
use aniviz_catalog::{enrich_records, CatalogClient, CatalogClientConfig, EnrichmentLimits, GenreCache};
use aniviz_config::{Config, ConfigLoader};
use aniviz_stats::{ChartOptions, StatsManager};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod input;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "aniviz", author, version, about, long_about = None)]
struct Args {
    /// Watch list export file (JSON)
    #[arg(short, long)]
    list: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn chart_options(config: &Config) -> ChartOptions {
    ChartOptions {
        disable_nsfw: config.charts.disable_nsfw,
        count_upcoming: config.charts.count_upcoming,
        interactive_charts: config.charts.interactive_charts,
        top_n_fastest: config.charts.top_n_fastest,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ConfigLoader::load().context("failed to load configuration")?,
    };

    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level);
    info!("aniviz starting");

    let records = input::load_records(&args.list)
        .with_context(|| format!("failed to load watch list {}", args.list.display()))?;

    let records = if config.catalog.client_id.is_empty() {
        warn!("no catalog client id configured, skipping genre enrichment");
        records
    } else {
        let client_config = CatalogClientConfig::new(
            config.catalog.base_url.clone(),
            config.catalog.client_id.clone(),
        )
        .with_timeout(config.catalog.timeout_seconds)
        .with_max_retries(config.catalog.max_retries as usize);
        let client = CatalogClient::new(client_config).context("failed to build catalog client")?;

        let cache = GenreCache::new(config.enrichment.cache_capacity);
        let limits = EnrichmentLimits {
            max_concurrency: config.enrichment.max_concurrency,
            per_item_timeout: Duration::from_secs(config.enrichment.per_item_timeout_seconds),
        };
        enrich_records(records, Arc::new(client), cache, &limits).await
    };

    let manager = StatsManager::new(chart_options(&config));
    let today = chrono::Local::now().date_naive();
    let report = manager.build_report(Arc::new(records), today).await;

    let rendered =
        serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
