use crate::writer::save_snapshot;
use crate::{Job, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct CrawlPipeline;

#[must_use = "pipeline must end with .save_snapshot() to write anything"]
pub struct PipelineWithJobs<C> {
    jobs: Vec<Job>,
    client: C,
}

impl CrawlPipeline {
    pub fn new() -> Self {
        Self
    }

    pub fn crawl<C>(self, client: C) -> Result<PipelineWithJobs<C>>
    where
        C: Crawler,
    {
        let jobs = client.start_crawl()?;
        Ok(PipelineWithJobs { jobs, client })
    }
}

impl Default for CrawlPipeline {
    fn default() -> Self {
        Self::new()
    }
}

pub trait Crawler {
    /// Identifier used in the snapshot file name
    fn company(&self) -> &str;

    fn start_crawl(&self) -> Result<Vec<Job>>;
}

impl<C> PipelineWithJobs<C>
where
    C: Crawler,
{
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Writes `{output_dir}/{company}-{date}.csv` and returns its path.
    pub fn save_snapshot(self, output_dir: impl AsRef<Path>, date: NaiveDate) -> Result<PathBuf> {
        let path = save_snapshot(&self.jobs, output_dir, self.client.company(), date)?;
        info!(path = %path.display(), rows = self.jobs.len(), "✅ csv saved");
        Ok(path)
    }
}
