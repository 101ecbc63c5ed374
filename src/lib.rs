pub mod clients;
pub mod crawler;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod writer;

pub use clients::{GoogleClient, GoogleCrawlConfig};
pub use crawler::{PaginatedApiCrawler, page_count};
pub use error::{Error, Result};
pub use models::{Job, PageResponse};
pub use pipeline::{CrawlPipeline, Crawler, PipelineWithJobs};
pub use writer::{save_snapshot, save_to_csv, snapshot_path};
