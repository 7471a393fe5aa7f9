use surveyor_crawler::CrawlOutcome;

/// Holds the most recent crawl outcome for a front end.
///
/// The analysis functions all take records directly; this exists so
/// interactive callers have one owned place to stash results between
/// actions instead of threading them through every call site.
#[derive(Debug, Default)]
pub struct ResultStore {
    outcome: Option<CrawlOutcome>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an outcome, replacing whatever was held before.
    pub fn set(&mut self, outcome: CrawlOutcome) {
        self.outcome = Some(outcome);
    }

    /// Borrows the held outcome, if any.
    pub fn get(&self) -> Option<&CrawlOutcome> {
        self.outcome.as_ref()
    }

    /// Removes and returns the held outcome, leaving the store empty.
    pub fn take(&mut self) -> Option<CrawlOutcome> {
        self.outcome.take()
    }

    pub fn is_empty(&self) -> bool {
        self.outcome.is_none()
    }
}
