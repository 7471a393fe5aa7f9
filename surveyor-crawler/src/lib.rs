pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod record;
pub mod robots;
pub mod scheduler;

pub use error::CrawlError;
pub use extractor::{PageExtractor, PageFields};
pub use fetcher::{PageFetcher, USER_AGENT};
pub use record::{CrawlOutcome, CrawlStatus, PageRecord};
pub use scheduler::{BlockedPolicy, CrawlScheduler, ProgressCallback};
