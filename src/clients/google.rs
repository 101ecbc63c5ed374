use crate::Result;
use crate::crawler::PaginatedApiCrawler;
use crate::models::{Job, PageResponse};
use crate::pipeline::Crawler;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{error, info, warn};

const COMPANY: &str = "google";
const BASE_URL: &str = "https://careers.google.com/api/v3/search/";

#[derive(Debug, Clone)]
pub struct GoogleCrawlConfig {
    /// Results per page served by the search API
    pub page_size: usize,
    /// Number of pages fetched at the same time
    pub thread_count: usize,
    /// Per-request timeout; `None` waits as long as the server takes
    pub request_timeout: Option<Duration>,
}

impl Default for GoogleCrawlConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            thread_count: 8,
            request_timeout: None,
        }
    }
}

pub struct GoogleClient {
    base_url: String,
    config: GoogleCrawlConfig,
    http: Client,
}

impl GoogleClient {
    pub fn new(config: GoogleCrawlConfig) -> Result<Self> {
        Self::with_base_url(config, BASE_URL)
    }

    pub fn with_base_url(config: GoogleCrawlConfig, base_url: impl Into<String>) -> Result<Self> {
        // reqwest's blocking client defaults to a 30s timeout
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            config,
            http,
        })
    }

    pub fn build_page_url(&self, page: usize) -> String {
        format!(
            "{}?distance=50&hl=en_US&jlo=en_US&page={}&q=",
            self.base_url, page
        )
    }
}

impl PaginatedApiCrawler for GoogleClient {
    fn page_size(&self) -> usize {
        self.config.page_size
    }

    fn thread_count(&self) -> usize {
        self.config.thread_count
    }

    fn fetch_page(&self, page: usize) -> Result<PageResponse> {
        let response: PageResponse = self
            .http
            .get(self.build_page_url(page))
            .send()?
            .error_for_status()?
            .json()?;

        // paging still follows the configured size
        if let Some(served) = response.page_size {
            if served != self.config.page_size as u64 {
                warn!(
                    page,
                    served,
                    configured = self.config.page_size,
                    "page size mismatch"
                );
            }
        }

        Ok(response)
    }
}

impl Crawler for GoogleClient {
    fn company(&self) -> &str {
        COMPANY
    }

    fn start_crawl(&self) -> Result<Vec<Job>> {
        info!("collecting google job listings..");
        self.fetch_all_jobs()
            .inspect(|jobs| info!(count = jobs.len(), "✅ google job listings collected"))
            .inspect_err(|e| error!(error = %e, "❌ google job listings failed"))
    }
}
