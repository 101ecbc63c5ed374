use careers_crawler::{CrawlPipeline, GoogleClient, GoogleCrawlConfig, Result};
use chrono::Local;
use tracing::info;
use tracing_subscriber::EnvFilter;

const OUTPUT_DIR: &str = "data";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let pipeline =
        CrawlPipeline::new().crawl(GoogleClient::new(GoogleCrawlConfig::default())?)?;
    info!(rows = pipeline.jobs().len(), "crawl finished");

    pipeline.save_snapshot(OUTPUT_DIR, Local::now().date_naive())?;

    Ok(())
}
