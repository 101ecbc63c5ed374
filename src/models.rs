use serde::Deserialize;
use serde_json::{Map, Value};

/// One job posting exactly as the upstream API returned it.
///
/// Keys keep their insertion order, which is what the CSV header follows.
pub type Job = Map<String, Value>;

/// Envelope returned for every page of the search API.
#[derive(Debug, Clone, Deserialize)]
pub struct PageResponse {
    pub count: u64,
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub page_size: Option<u64>,
    #[serde(default)]
    pub next_page: Option<u64>,
}
