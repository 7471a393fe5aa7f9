// Ranking-candidate analysis: which terms is each page best placed to
// rank for, and what intent do those terms serve.

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use surveyor_crawler::{PageExtractor, PageRecord};

use crate::intent::{Intent, candidate_intent};
use crate::tfidf::{TermScore, TfidfExtractor};

/// The text a search engine weighs most, pulled out of one page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageText {
    pub title: String,
    pub description: String,
    pub h1: String,
    pub body: String,
}

impl PageText {
    /// Title, description, first H1, and body joined into one document
    /// for corpus analysis.
    pub fn document_text(&self) -> String {
        [
            self.title.as_str(),
            self.description.as_str(),
            self.h1.as_str(),
            self.body.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Pulls the SEO-relevant text fields out of raw HTML.
///
/// The description falls back to `og:description` when the standard meta
/// tag is missing. Plain text input passes through unchanged as the body.
pub fn extract_page_text(html: &str) -> PageText {
    if html.trim().is_empty() {
        return PageText::default();
    }

    let document = Html::parse_document(html);

    let title_selector = Selector::parse("title").unwrap();
    let title = document
        .select(&title_selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let description_selector = Selector::parse(r#"meta[name="description"]"#).unwrap();
    let og_description_selector = Selector::parse(r#"meta[property="og:description"]"#).unwrap();
    let description = document
        .select(&description_selector)
        .next()
        .or_else(|| document.select(&og_description_selector).next())
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    let h1_selector = Selector::parse("h1").unwrap();
    let h1 = document
        .select(&h1_selector)
        .next()
        .map(PageExtractor::element_text)
        .unwrap_or_default();

    let body = PageExtractor::visible_text(&document);

    PageText {
        title,
        description,
        h1,
        body,
    }
}

/// The terms one crawled page is best placed to rank for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageCandidates {
    pub url: String,
    /// Highest-weighted TF-IDF terms of this page, best first.
    pub terms: Vec<TermScore>,
    /// The intent most of the top terms serve.
    pub intent: Intent,
}

impl PageCandidates {
    /// The candidate terms as one comma-separated string.
    pub fn terms_joined(&self) -> String {
        self.terms
            .iter()
            .map(|t| t.term.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Scores every crawled page's candidate terms against the whole crawl.
///
/// Each record's stored HTML becomes one corpus document. Records without
/// HTML produce an empty candidate list for their URL.
pub fn analyze_organic_candidates(records: &[PageRecord], top_n: usize) -> Vec<PageCandidates> {
    analyze_organic_candidates_with(records, top_n, &TfidfExtractor::default())
}

/// Same as [`analyze_organic_candidates`] with a caller-built extractor.
pub fn analyze_organic_candidates_with(
    records: &[PageRecord],
    top_n: usize,
    extractor: &TfidfExtractor,
) -> Vec<PageCandidates> {
    let documents: Vec<String> = records
        .iter()
        .map(|record| {
            record
                .html
                .as_deref()
                .map(|html| extract_page_text(html).document_text())
                .unwrap_or_default()
        })
        .collect();
    debug!("scoring {} documents for candidate terms", documents.len());

    let per_document = extractor.top_terms(&documents, top_n);

    records
        .iter()
        .zip(per_document)
        .map(|(record, terms)| {
            let intent = dominant_intent(&terms);
            PageCandidates {
                url: record.url.clone(),
                terms,
                intent,
            }
        })
        .collect()
}

/// The intent most of the terms classify to. First intent to reach the
/// highest count wins; no terms at all means [`Intent::Unknown`].
fn dominant_intent(terms: &[TermScore]) -> Intent {
    let mut tallies: Vec<(Intent, usize)> = Vec::new();
    for term in terms {
        let intent = candidate_intent(&term.term);
        match tallies.iter_mut().find(|(i, _)| *i == intent) {
            Some((_, count)) => *count += 1,
            None => tallies.push((intent, 1)),
        }
    }

    let mut best = Intent::Unknown;
    let mut best_count = 0;
    for (intent, count) in tallies {
        if count > best_count {
            best = intent;
            best_count = count;
        }
    }
    best
}
