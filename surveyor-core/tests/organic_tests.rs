// Tests for page text extraction and ranking-candidate analysis

use surveyor_core::Intent;
use surveyor_core::organic::{PageCandidates, analyze_organic_candidates, extract_page_text};
use surveyor_core::tfidf::TermScore;
use surveyor_crawler::PageRecord;

fn record_with_html(url: &str, html: &str) -> PageRecord {
    PageRecord {
        html: Some(html.to_string()),
        ..PageRecord::new(url.to_string())
    }
}

// ============================================================================
// Page Text Extraction Tests
// ============================================================================

#[test]
fn test_extract_page_text_pulls_seo_fields() {
    let html = r#"<html><head>
        <title> Crawl Handbook </title>
        <meta name="description" content="Everything about crawling.">
    </head><body>
        <h1>Getting Started</h1>
        <p>Crawlers fetch pages politely.</p>
    </body></html>"#;

    let text = extract_page_text(html);
    assert_eq!(text.title, "Crawl Handbook");
    assert_eq!(text.description, "Everything about crawling.");
    assert_eq!(text.h1, "Getting Started");
    assert!(text.body.contains("Crawlers fetch pages politely."));
}

#[test]
fn test_extract_page_text_og_description_fallback() {
    let html = r#"<html><head>
        <meta property="og:description" content="Social preview copy.">
    </head><body></body></html>"#;

    let text = extract_page_text(html);
    assert_eq!(text.description, "Social preview copy.");
}

#[test]
fn test_extract_page_text_prefers_standard_description() {
    let html = r#"<html><head>
        <meta name="description" content="The real description.">
        <meta property="og:description" content="Social preview copy.">
    </head><body></body></html>"#;

    let text = extract_page_text(html);
    assert_eq!(text.description, "The real description.");
}

#[test]
fn test_extract_page_text_plain_text_passes_through() {
    let text = extract_page_text("just plain words");
    assert_eq!(text.title, "");
    assert_eq!(text.description, "");
    assert_eq!(text.h1, "");
    assert_eq!(text.body, "just plain words");
}

#[test]
fn test_extract_page_text_empty_input() {
    let text = extract_page_text("   \n  ");
    assert_eq!(text.title, "");
    assert_eq!(text.body, "");
}

#[test]
fn test_extract_page_text_skips_scripts_and_styles() {
    let html = r#"<html><body>
        <p>visible copy</p>
        <script>var hidden = "nope";</script>
        <style>.x { color: red; }</style>
    </body></html>"#;

    let text = extract_page_text(html);
    assert!(text.body.contains("visible copy"));
    assert!(!text.body.contains("hidden"));
    assert!(!text.body.contains("color"));
}

#[test]
fn test_document_text_joins_non_empty_parts() {
    let mut text = extract_page_text(
        r#"<html><head><title>Title</title></head><body><h1>Heading</h1></body></html>"#,
    );
    text.body = String::new();

    assert_eq!(text.document_text(), "Title Heading");
}

#[test]
fn test_document_text_of_empty_page() {
    let text = extract_page_text("");
    assert_eq!(text.document_text(), "");
}

// ============================================================================
// Candidate Analysis Tests
// ============================================================================

#[test]
fn test_candidates_cover_every_record_in_order() {
    let records = vec![
        record_with_html(
            "https://example.com/",
            "<html><body><p>crawl budget allocation</p></body></html>",
        ),
        PageRecord::new("https://example.com/bare".to_string()),
        record_with_html(
            "https://example.com/render",
            "<html><body><p>render queue timing</p></body></html>",
        ),
    ];

    let candidates = analyze_organic_candidates(&records, 10);

    assert_eq!(candidates.len(), 3);
    assert_eq!(candidates[0].url, "https://example.com/");
    assert_eq!(candidates[1].url, "https://example.com/bare");
    assert_eq!(candidates[2].url, "https://example.com/render");

    assert!(!candidates[0].terms.is_empty());
    assert!(candidates[1].terms.is_empty());
    assert_eq!(candidates[1].intent, Intent::Unknown);
}

#[test]
fn test_candidates_weigh_page_specific_terms_over_shared_ones() {
    let records = vec![
        record_with_html(
            "https://example.com/a",
            "<html><body><p>falcon migration patterns</p></body></html>",
        ),
        record_with_html(
            "https://example.com/b",
            "<html><body><p>falcon heron nesting</p></body></html>",
        ),
    ];

    let candidates = analyze_organic_candidates(&records, 10);

    let score_of = |page: &PageCandidates, term: &str| {
        page.terms
            .iter()
            .find(|t| t.term == term)
            .map(|t| t.score)
            .unwrap_or_else(|| panic!("{} missing from {}", term, page.url))
    };

    // "falcon" appears on both pages and scores below each page's own terms
    assert!(score_of(&candidates[0], "migration") > score_of(&candidates[0], "falcon"));
    assert!(score_of(&candidates[1], "heron") > score_of(&candidates[1], "falcon"));
}

#[test]
fn test_candidate_intent_follows_term_majority() {
    let records = vec![
        record_with_html(
            "https://example.com/store",
            "<html><body><p>buy discount price</p></body></html>",
        ),
        record_with_html(
            "https://example.com/docs",
            "<html><body><p>guide tutorial tips</p></body></html>",
        ),
    ];

    let candidates = analyze_organic_candidates(&records, 10);

    assert_eq!(candidates[0].intent, Intent::Transactional);
    assert_eq!(candidates[1].intent, Intent::Informational);
}

#[test]
fn test_candidates_empty_records() {
    assert!(analyze_organic_candidates(&[], 10).is_empty());
}

// ============================================================================
// Terms Joined Tests
// ============================================================================

#[test]
fn test_terms_joined_comma_separates() {
    let candidates = PageCandidates {
        url: "https://example.com/".to_string(),
        terms: vec![
            TermScore {
                term: "crawl budget".to_string(),
                score: 0.8,
            },
            TermScore {
                term: "sitemap".to_string(),
                score: 0.5,
            },
        ],
        intent: Intent::Informational,
    };

    assert_eq!(candidates.terms_joined(), "crawl budget, sitemap");
}

#[test]
fn test_terms_joined_empty() {
    let candidates = PageCandidates {
        url: "https://example.com/".to_string(),
        terms: Vec::new(),
        intent: Intent::Unknown,
    };

    assert_eq!(candidates.terms_joined(), "");
}
