use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How fetching one URL ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrawlStatus {
    Success,
    HttpError,
    Error,
    Blocked,
}

impl std::fmt::Display for CrawlStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrawlStatus::Success => write!(f, "Success"),
            CrawlStatus::HttpError => write!(f, "HTTP Error"),
            CrawlStatus::Error => write!(f, "Error"),
            CrawlStatus::Blocked => write!(f, "Blocked"),
        }
    }
}

/// One row per attempted URL. Degraded rows (HTTP errors, transport
/// errors, robots blocks) keep the content fields empty/zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    pub status: Option<u16>,
    pub crawl_status: CrawlStatus,
    pub error: Option<String>,
    pub title: String,
    pub title_length: usize,
    pub description: String,
    pub description_length: usize,
    pub h1: String,
    pub headings: BTreeMap<String, Vec<String>>,
    pub word_count: usize,
    pub internal_links: usize,
    pub external_links: usize,
    pub link_to_word_ratio: f64,
    pub schema: String,
    pub content_type: String,
    pub mime_type: String,
    pub crawl_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

impl PageRecord {
    pub fn new(url: String) -> Self {
        Self {
            url,
            status: None,
            crawl_status: CrawlStatus::Success,
            error: None,
            title: String::new(),
            title_length: 0,
            description: String::new(),
            description_length: 0,
            h1: String::new(),
            headings: BTreeMap::new(),
            word_count: 0,
            internal_links: 0,
            external_links: 0,
            link_to_word_ratio: 0.0,
            schema: String::new(),
            content_type: String::new(),
            mime_type: String::new(),
            crawl_time: 0.0,
            html: None,
        }
    }

    pub fn with_error(url: String, error: String) -> Self {
        Self {
            crawl_status: CrawlStatus::Error,
            error: Some(error),
            ..Self::new(url)
        }
    }

    pub fn http_error(url: String, status: u16, mime_type: String, crawl_time: f64) -> Self {
        Self {
            status: Some(status),
            crawl_status: CrawlStatus::HttpError,
            mime_type,
            crawl_time,
            ..Self::new(url)
        }
    }

    pub fn blocked(url: String) -> Self {
        Self {
            crawl_status: CrawlStatus::Blocked,
            ..Self::new(url)
        }
    }

    pub fn is_success(&self) -> bool {
        self.crawl_status == CrawlStatus::Success
    }
}

/// Everything one crawl run produced. A robots-blocked run carries no
/// records, only the URL of the robots.txt that stopped it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlOutcome {
    pub records: Vec<PageRecord>,
    pub blocked: bool,
    pub robots_url: Option<String>,
}

impl CrawlOutcome {
    pub fn completed(records: Vec<PageRecord>) -> Self {
        Self {
            records,
            blocked: false,
            robots_url: None,
        }
    }

    pub fn blocked(robots_url: Option<String>) -> Self {
        Self {
            records: Vec::new(),
            blocked: true,
            robots_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_empty() {
        let record = PageRecord::new("https://example.com".to_string());
        assert_eq!(record.status, None);
        assert_eq!(record.crawl_status, CrawlStatus::Success);
        assert!(record.title.is_empty());
        assert_eq!(record.word_count, 0);
        assert_eq!(record.link_to_word_ratio, 0.0);
        assert!(record.html.is_none());
    }

    #[test]
    fn test_error_record_keeps_message() {
        let record = PageRecord::with_error(
            "https://example.com/down".to_string(),
            "connection reset".to_string(),
        );
        assert_eq!(record.crawl_status, CrawlStatus::Error);
        assert_eq!(record.error.as_deref(), Some("connection reset"));
        assert_eq!(record.status, None);
    }

    #[test]
    fn test_http_error_record_skips_content_fields() {
        let record = PageRecord::http_error(
            "https://example.com/missing".to_string(),
            404,
            "text/html".to_string(),
            0.12,
        );
        assert_eq!(record.status, Some(404));
        assert_eq!(record.crawl_status, CrawlStatus::HttpError);
        assert!(record.title.is_empty());
        assert_eq!(record.word_count, 0);
    }

    #[test]
    fn test_blocked_outcome_has_no_records() {
        let outcome = CrawlOutcome::blocked(Some("https://example.com/robots.txt".to_string()));
        assert!(outcome.blocked);
        assert!(outcome.records.is_empty());
        assert_eq!(
            outcome.robots_url.as_deref(),
            Some("https://example.com/robots.txt")
        );
    }
}
