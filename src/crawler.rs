use crate::models::{Job, PageResponse};
use crate::{Error, Result};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::{debug, info};

/// Number of pages needed to cover `total` records, `page_size` per page.
pub fn page_count(total: u64, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size as u64) as usize
}

/// A JSON search API that reports its total hit count and serves results in
/// numbered pages starting at 1.
pub trait PaginatedApiCrawler: Sync {
    fn page_size(&self) -> usize;

    fn thread_count(&self) -> usize;

    fn fetch_page(&self, page: usize) -> Result<PageResponse>;

    fn fetch_total_count(&self) -> Result<u64> {
        let total = self.fetch_page(1)?.count;
        info!(total, "total jobs");
        Ok(total)
    }

    /// Fetches every page in parallel and returns the jobs in page order.
    /// A single failed page fails the whole crawl.
    fn fetch_all_jobs(&self) -> Result<Vec<Job>> {
        let page_size = self.page_size();
        let thread_count = self.thread_count();
        if page_size == 0 {
            return Err(Error::Config("page_size must be greater than zero".to_string()));
        }
        if thread_count == 0 {
            return Err(Error::Config("thread_count must be greater than zero".to_string()));
        }

        let total = self.fetch_total_count()?;
        let pages = page_count(total, page_size);
        info!(pages, page_size, thread_count, "fetching pages");

        let pool = ThreadPoolBuilder::new().num_threads(thread_count).build()?;

        let responses = pool.install(|| {
            (1..=pages)
                .into_par_iter()
                .map(|page| {
                    let response = self.fetch_page(page)?;
                    debug!(page, jobs = response.jobs.len(), "fetched page");
                    Ok(response)
                })
                .collect::<Result<Vec<_>>>()
        })?;

        Ok(responses
            .into_iter()
            .flat_map(|response| response.jobs)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    struct FakeCrawler {
        total: u64,
        page_size: usize,
        thread_count: usize,
        failing_page: Option<usize>,
        requested: Mutex<Vec<usize>>,
    }

    impl FakeCrawler {
        fn new(total: u64, page_size: usize) -> Self {
            Self {
                total,
                page_size,
                thread_count: 4,
                failing_page: None,
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested_pages(&self) -> Vec<usize> {
            let mut pages = self.requested.lock().unwrap().clone();
            pages.sort();
            pages
        }
    }

    impl PaginatedApiCrawler for FakeCrawler {
        fn page_size(&self) -> usize {
            self.page_size
        }

        fn thread_count(&self) -> usize {
            self.thread_count
        }

        fn fetch_page(&self, page: usize) -> Result<PageResponse> {
            self.requested.lock().unwrap().push(page);
            if self.failing_page == Some(page) {
                return Err(Error::Config(format!("page {} unavailable", page)));
            }

            let start = ((page - 1) * self.page_size) as u64;
            let end = (start + self.page_size as u64).min(self.total);
            let jobs = (start..end)
                .map(|index| {
                    json!({ "page": page, "index": index })
                        .as_object()
                        .unwrap()
                        .clone()
                })
                .collect();

            Ok(PageResponse {
                count: self.total,
                jobs,
                page_size: Some(self.page_size as u64),
                next_page: None,
            })
        }
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(25, 20), 2);
        assert_eq!(page_count(1, 20), 1);
        assert_eq!(page_count(0, 20), 0);
    }

    #[test]
    fn page_count_exact_multiple_has_no_extra_page() {
        assert_eq!(page_count(40, 20), 2);
        assert_eq!(page_count(20, 20), 1);
    }

    #[test]
    fn fans_out_one_fetch_per_page() {
        let crawler = FakeCrawler::new(25, 20);
        let jobs = crawler.fetch_all_jobs().unwrap();

        // page 1 twice: once for the total count, once in the fan-out
        assert_eq!(crawler.requested_pages(), vec![1, 1, 2]);
        assert_eq!(jobs.len(), 25);
    }

    #[test]
    fn zero_total_fetches_only_the_count_page() {
        let crawler = FakeCrawler::new(0, 20);
        let jobs = crawler.fetch_all_jobs().unwrap();

        assert_eq!(crawler.requested_pages(), vec![1]);
        assert!(jobs.is_empty());
    }

    #[test]
    fn flattens_jobs_in_page_order() {
        let crawler = FakeCrawler::new(95, 10);
        let jobs = crawler.fetch_all_jobs().unwrap();

        assert_eq!(jobs.len(), 95);
        let indexes: Vec<u64> = jobs
            .iter()
            .map(|job| job["index"].as_u64().unwrap())
            .collect();
        assert_eq!(indexes, (0..95).collect::<Vec<_>>());
    }

    #[test]
    fn one_failed_page_fails_the_crawl() {
        let mut crawler = FakeCrawler::new(60, 20);
        crawler.failing_page = Some(3);

        let result = crawler.fetch_all_jobs();
        assert!(result.is_err());
    }

    #[test]
    fn zero_page_size_is_rejected_before_fetching() {
        let crawler = FakeCrawler::new(10, 0);

        let result = crawler.fetch_all_jobs();
        assert!(matches!(result, Err(Error::Config(_))));
        assert!(crawler.requested_pages().is_empty());
    }

    #[test]
    fn zero_thread_count_is_rejected_before_fetching() {
        let mut crawler = FakeCrawler::new(10, 5);
        crawler.thread_count = 0;

        let result = crawler.fetch_all_jobs();
        assert!(matches!(result, Err(Error::Config(_))));
        assert!(crawler.requested_pages().is_empty());
    }
}
