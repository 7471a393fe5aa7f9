use crate::error::{CrawlError, Result};
use crate::extractor::{PageExtractor, PageFields};
use crate::fetcher::{FetchedPage, PageFetcher, USER_AGENT};
use crate::record::{CrawlOutcome, PageRecord};
use crate::robots::RobotsGate;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

pub type ProgressCallback = Arc<dyn Fn(f64, String) + Send + Sync>;

/// What to do when robots.txt disallows a URL mid-crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockedPolicy {
    /// First blocked URL aborts the whole crawl; no records are returned.
    Abort,
    /// Record a Blocked row for that URL and keep crawling.
    Skip,
}

/// Breadth-first, single-task crawl of one site. FIFO frontier, visited
/// set, page cap, politeness sleep after every processed URL. Only links
/// on the seed's host are ever enqueued.
pub struct CrawlScheduler {
    fetcher: PageFetcher,
    max_pages: usize,
    delay: Duration,
    ignore_robots: bool,
    blocked_policy: BlockedPolicy,
    keep_html: bool,
    progress_callback: Option<ProgressCallback>,
}

impl CrawlScheduler {
    pub fn new() -> Self {
        Self {
            fetcher: PageFetcher::new(),
            max_pages: 100,
            delay: Duration::from_millis(500),
            ignore_robots: false,
            blocked_policy: BlockedPolicy::Abort,
            keep_html: false,
            progress_callback: None,
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_ignore_robots(mut self, ignore_robots: bool) -> Self {
        self.ignore_robots = ignore_robots;
        self
    }

    pub fn with_blocked_policy(mut self, policy: BlockedPolicy) -> Self {
        self.blocked_policy = policy;
        self
    }

    pub fn with_keep_html(mut self, keep_html: bool) -> Self {
        self.keep_html = keep_html;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub async fn crawl(&self, seed_url: &str) -> Result<CrawlOutcome> {
        let seed = Url::parse(seed_url.trim())
            .map_err(|e| CrawlError::InvalidUrl(format!("{}: {}", seed_url, e)))?;
        let seed_host = seed
            .host_str()
            .ok_or_else(|| CrawlError::InvalidUrl(format!("{} has no host", seed_url)))?
            .to_string();

        info!("Starting crawl of {} (max {} pages)", seed, self.max_pages);

        // One gate per run: robots.txt is cached per origin for this crawl only
        let mut gate =
            RobotsGate::new(self.fetcher.client().clone(), USER_AGENT, self.ignore_robots);

        let mut frontier: VecDeque<String> = VecDeque::new();
        let mut queued: HashSet<String> = HashSet::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut records: Vec<PageRecord> = Vec::new();

        let seed_string = seed.to_string();
        queued.insert(seed_string.clone());
        frontier.push_back(seed_string);

        while visited.len() < self.max_pages {
            let Some(next) = frontier.pop_front() else {
                break;
            };
            let url = normalize_url(&next);
            if url.is_empty() || visited.contains(&url) {
                continue;
            }
            let Ok(current) = Url::parse(&url) else {
                continue;
            };

            let (allowed, robots_url) = gate.is_allowed(&current).await;
            if !allowed {
                match self.blocked_policy {
                    BlockedPolicy::Abort => {
                        warn!("{} disallowed by robots.txt, aborting crawl", url);
                        return Ok(CrawlOutcome::blocked(robots_url));
                    }
                    BlockedPolicy::Skip => {
                        debug!("{} disallowed by robots.txt, skipping", url);
                        records.push(PageRecord::blocked(url.clone()));
                        visited.insert(url);
                        self.pause().await;
                        continue;
                    }
                }
            }

            if let Some(ref callback) = self.progress_callback {
                let fraction = (visited.len() as f64 / self.max_pages as f64).min(1.0);
                callback(fraction, format!("Crawling: {}", url));
            }

            match self.fetcher.fetch(&url).await {
                Err(e) => {
                    debug!("Fetch failed for {}: {}", url, e);
                    records.push(PageRecord::with_error(url.clone(), e.to_string()));
                }
                Ok(page) if page.status >= 400 => {
                    debug!("{} returned {}", url, page.status);
                    records.push(PageRecord::http_error(
                        url.clone(),
                        page.status,
                        page.mime_type(),
                        page.elapsed_secs(),
                    ));
                }
                Ok(page) => {
                    let fields = PageExtractor::extract(&current, &page.body, &seed_host);
                    for link in &fields.internal_links {
                        if visited.contains(link) || queued.contains(link) {
                            continue;
                        }
                        let crawlable = Url::parse(link)
                            .map(|u| matches!(u.scheme(), "http" | "https"))
                            .unwrap_or(false);
                        if crawlable {
                            queued.insert(link.clone());
                            frontier.push_back(link.clone());
                        }
                    }
                    records.push(self.build_record(&url, &page, fields));
                }
            }

            visited.insert(url);
            self.pause().await;
        }

        info!("Crawl complete. Visited {} pages", visited.len());
        Ok(CrawlOutcome::completed(records))
    }

    fn build_record(&self, url: &str, page: &FetchedPage, fields: PageFields) -> PageRecord {
        let mut record = PageRecord::new(url.to_string());
        record.status = Some(page.status);
        record.title_length = fields.title.chars().count();
        record.title = fields.title;
        record.description_length = fields.description.chars().count();
        record.description = fields.description;
        record.h1 = fields.h1;
        record.headings = fields.headings;
        record.word_count = fields.word_count;
        record.internal_links = fields.internal_links.len();
        record.external_links = fields.external_count;
        record.link_to_word_ratio = fields.link_to_word_ratio;
        record.schema = fields.schema;
        record.content_type = fields.content_type;
        record.mime_type = page.mime_type();
        record.crawl_time = page.elapsed_secs();
        if self.keep_html {
            record.html = Some(page.body.clone());
        }
        record
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for CrawlScheduler {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_url(url: &str) -> String {
    url.split('#').next().unwrap_or("").trim().to_string()
}
