pub mod google;

pub use google::{GoogleClient, GoogleCrawlConfig};
