// Site-level audits over a set of crawled page records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use surveyor_crawler::PageRecord;

/// One page that shares an on-page value with at least one other page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateRow {
    pub url: String,
    pub value: String,
}

/// Pages sharing titles, descriptions, or H1s. Blank values never count
/// as duplicates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DuplicateReport {
    pub titles: Vec<DuplicateRow>,
    pub descriptions: Vec<DuplicateRow>,
    pub h1s: Vec<DuplicateRow>,
}

impl DuplicateReport {
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty() && self.descriptions.is_empty() && self.h1s.is_empty()
    }

    pub fn total(&self) -> usize {
        self.titles.len() + self.descriptions.len() + self.h1s.len()
    }
}

/// Flags every page whose title, description, or H1 appears on more than
/// one page. Rows keep crawl order.
pub fn find_duplicates(records: &[PageRecord]) -> DuplicateReport {
    DuplicateReport {
        titles: duplicate_rows(records, |r| r.title.as_str()),
        descriptions: duplicate_rows(records, |r| r.description.as_str()),
        h1s: duplicate_rows(records, |r| r.h1.as_str()),
    }
}

fn duplicate_rows(records: &[PageRecord], field: fn(&PageRecord) -> &str) -> Vec<DuplicateRow> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let value = field(record);
        if !value.trim().is_empty() {
            *counts.entry(value).or_insert(0) += 1;
        }
    }

    records
        .iter()
        .filter(|record| counts.get(field(record)).copied().unwrap_or(0) > 1)
        .map(|record| DuplicateRow {
            url: record.url.clone(),
            value: field(record).to_string(),
        })
        .collect()
}

/// Site-wide metrics over every row of a crawl, degraded rows included.
/// Averages are whole numbers except crawl time, which keeps 2 dp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteSummary {
    pub pages_crawled: usize,
    pub successful: usize,
    pub errors: usize,
    pub avg_title_length: usize,
    pub avg_description_length: usize,
    pub avg_word_count: usize,
    pub avg_crawl_time: f64,
}

/// Computes the site summary for a crawl.
pub fn summarize(records: &[PageRecord]) -> SiteSummary {
    if records.is_empty() {
        return SiteSummary::default();
    }

    let pages_crawled = records.len();
    let successful = records.iter().filter(|r| r.is_success()).count();

    let total_title: usize = records.iter().map(|r| r.title_length).sum();
    let total_description: usize = records.iter().map(|r| r.description_length).sum();
    let total_words: usize = records.iter().map(|r| r.word_count).sum();
    let total_time: f64 = records.iter().map(|r| r.crawl_time).sum();

    SiteSummary {
        pages_crawled,
        successful,
        errors: pages_crawled - successful,
        avg_title_length: total_title / pages_crawled,
        avg_description_length: total_description / pages_crawled,
        avg_word_count: total_words / pages_crawled,
        avg_crawl_time: (total_time / pages_crawled as f64 * 100.0).round() / 100.0,
    }
}
