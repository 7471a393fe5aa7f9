// Tests for duplicate detection and site summaries

use surveyor_core::audit::{find_duplicates, summarize};
use surveyor_crawler::PageRecord;

fn page(url: &str, title: &str, description: &str, h1: &str) -> PageRecord {
    PageRecord {
        title: title.to_string(),
        title_length: title.chars().count(),
        description: description.to_string(),
        description_length: description.chars().count(),
        h1: h1.to_string(),
        ..PageRecord::new(url.to_string())
    }
}

// ============================================================================
// Duplicate Detection Tests
// ============================================================================

#[test]
fn test_duplicates_flag_every_sharing_page() {
    let records = vec![
        page("https://example.com/a", "Shared Title", "Unique A", "One"),
        page("https://example.com/b", "Shared Title", "Unique B", "Two"),
        page("https://example.com/c", "Other Title", "Unique C", "Three"),
    ];

    let report = find_duplicates(&records);

    assert_eq!(report.titles.len(), 2);
    assert_eq!(report.titles[0].url, "https://example.com/a");
    assert_eq!(report.titles[1].url, "https://example.com/b");
    assert_eq!(report.titles[0].value, "Shared Title");
    assert!(report.descriptions.is_empty());
    assert!(report.h1s.is_empty());
    assert_eq!(report.total(), 2);
    assert!(!report.is_empty());
}

#[test]
fn test_duplicates_checked_per_field() {
    let records = vec![
        page("https://example.com/a", "Title A", "Same desc", "Same H1"),
        page("https://example.com/b", "Title B", "Same desc", "Same H1"),
    ];

    let report = find_duplicates(&records);

    assert!(report.titles.is_empty());
    assert_eq!(report.descriptions.len(), 2);
    assert_eq!(report.h1s.len(), 2);
    assert_eq!(report.total(), 4);
}

#[test]
fn test_blank_values_never_count_as_duplicates() {
    let records = vec![
        page("https://example.com/a", "", "   ", ""),
        page("https://example.com/b", "", "   ", ""),
    ];

    let report = find_duplicates(&records);
    assert!(report.is_empty());
    assert_eq!(report.total(), 0);
}

#[test]
fn test_unique_values_are_not_flagged() {
    let records = vec![
        page("https://example.com/a", "Title A", "Desc A", "H1 A"),
        page("https://example.com/b", "Title B", "Desc B", "H1 B"),
    ];

    assert!(find_duplicates(&records).is_empty());
}

#[test]
fn test_duplicates_of_empty_crawl() {
    assert!(find_duplicates(&[]).is_empty());
}

// ============================================================================
// Site Summary Tests
// ============================================================================

#[test]
fn test_summary_counts_and_averages() {
    let mut a = page("https://example.com/a", "Title", "Description", "H1");
    a.title_length = 10;
    a.description_length = 100;
    a.word_count = 500;
    a.crawl_time = 0.5;

    let mut b = page("https://example.com/b", "Title", "Description", "H1");
    b.title_length = 21;
    b.description_length = 151;
    b.word_count = 801;
    b.crawl_time = 0.25;

    let summary = summarize(&[a, b]);

    assert_eq!(summary.pages_crawled, 2);
    assert_eq!(summary.successful, 2);
    assert_eq!(summary.errors, 0);

    // Whole-number averages truncate
    assert_eq!(summary.avg_title_length, 15);
    assert_eq!(summary.avg_description_length, 125);
    assert_eq!(summary.avg_word_count, 650);
    assert_eq!(summary.avg_crawl_time, 0.38);
}

#[test]
fn test_summary_counts_degraded_rows_as_errors() {
    let records = vec![
        page("https://example.com/", "Home", "Desc", "H1"),
        PageRecord::http_error(
            "https://example.com/missing".to_string(),
            404,
            "text/html".to_string(),
            0.1,
        ),
        PageRecord::with_error(
            "https://example.com/down".to_string(),
            "connection reset".to_string(),
        ),
    ];

    let summary = summarize(&records);
    assert_eq!(summary.pages_crawled, 3);
    assert_eq!(summary.successful, 1);
    assert_eq!(summary.errors, 2);
}

#[test]
fn test_summary_of_empty_crawl_is_all_zero() {
    let summary = summarize(&[]);
    assert_eq!(summary.pages_crawled, 0);
    assert_eq!(summary.successful, 0);
    assert_eq!(summary.errors, 0);
    assert_eq!(summary.avg_title_length, 0);
    assert_eq!(summary.avg_crawl_time, 0.0);
}
