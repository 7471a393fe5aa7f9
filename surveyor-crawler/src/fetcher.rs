use crate::error::Result;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;

/// Identifying user agent sent with every request, robots.txt included.
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; Surveyor/1.0; +https://example.com)";

/// Hard per-request timeout in seconds.
pub const FETCH_TIMEOUT_SECS: u64 = 12;

/// A fetched page before any parsing.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
    pub elapsed: Duration,
}

impl FetchedPage {
    /// Wall-clock fetch duration in seconds, two decimals.
    pub fn elapsed_secs(&self) -> f64 {
        (self.elapsed.as_secs_f64() * 100.0).round() / 100.0
    }

    pub fn mime_type(&self) -> String {
        self.content_type.clone().unwrap_or_default()
    }
}

/// Issues exactly one GET per call with a fixed user agent and timeout.
/// No retries; any transport failure is the caller's to record.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::limited(5))
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// The shared client, for collaborators that issue their own requests
    /// (the robots.txt gate) so cookies and the user agent stay consistent.
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        debug!("Fetching {}", url);

        let start = Instant::now();
        let response = self.client.get(url).send().await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response.text().await?;
        let elapsed = start.elapsed();

        Ok(FetchedPage {
            status,
            content_type,
            body,
            elapsed,
        })
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}
