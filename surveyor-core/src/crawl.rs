use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use url::Url;

use surveyor_crawler::{
    BlockedPolicy, CrawlError, CrawlOutcome, CrawlScheduler, CrawlStatus, PageRecord,
};

/// Options for configuring a crawl operation
pub struct CrawlOptions {
    pub seed_url: String,
    pub max_pages: usize,
    pub delay_secs: f64,
    pub ignore_robots: bool,
    /// Record robots-blocked URLs and keep going instead of aborting.
    pub skip_blocked: bool,
    /// Retain raw HTML on successful records, for keyword analysis.
    pub keep_html: bool,
    pub show_progress_bar: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            seed_url: String::new(),
            max_pages: 100,
            delay_secs: 0.5,
            ignore_robots: false,
            skip_blocked: false,
            keep_html: false,
            show_progress_bar: true,
        }
    }
}

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Execute a crawl with the given options
/// Returns the crawl outcome
pub async fn execute_crawl(options: CrawlOptions) -> Result<CrawlOutcome, CrawlError> {
    let CrawlOptions {
        seed_url,
        max_pages,
        delay_secs,
        ignore_robots,
        skip_blocked,
        keep_html,
        show_progress_bar,
    } = options;

    // Set up single progress bar for overall crawl progress (only if enabled)
    let progress_bar = if show_progress_bar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message("Starting crawl...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let blocked_policy = if skip_blocked {
        BlockedPolicy::Skip
    } else {
        BlockedPolicy::Abort
    };

    let mut scheduler = CrawlScheduler::new()
        .with_max_pages(max_pages)
        .with_delay(Duration::from_secs_f64(delay_secs.max(0.0)))
        .with_ignore_robots(ignore_robots)
        .with_blocked_policy(blocked_policy)
        .with_keep_html(keep_html);

    // Progress callback for scheduler updates (only if progress bar enabled)
    if let Some(ref pb) = progress_bar {
        let pb_clone = pb.clone();
        scheduler = scheduler.with_progress_callback(Arc::new(
            move |fraction: f64, message: String| {
                pb_clone.set_message(format!("[{:>3.0}%] {}", fraction * 100.0, message));
                pb_clone.tick();
            },
        ));
    }

    let outcome = scheduler.crawl(&seed_url).await?;

    // Finish progress bar (only if enabled)
    if let Some(ref pb) = progress_bar {
        if outcome.blocked {
            pb.finish_with_message("Crawl blocked by robots.txt");
        } else {
            pb.finish_with_message(format!(
                "Crawl complete! {} pages processed",
                outcome.records.len()
            ));
        }
    }

    Ok(outcome)
}

/// Generate a crawl report from page records
pub fn generate_crawl_report(records: &[PageRecord]) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Pages crawled: {}\n", records.len()));

    let successful = records.iter().filter(|r| r.is_success()).count();
    report.push_str(&format!("  Successful: {}\n", successful));
    report.push_str(&format!("  Errors: {}\n", records.len() - successful));

    let total_words: usize = records.iter().map(|r| r.word_count).sum();
    report.push_str(&format!("  Total words: {}\n", total_words));

    let total_internal: usize = records.iter().map(|r| r.internal_links).sum();
    report.push_str(&format!("  Internal links found: {}\n", total_internal));

    let total_external: usize = records.iter().map(|r| r.external_links).sum();
    report.push_str(&format!("  External links found: {}\n", total_external));

    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    // Group successful pages by content type; everything else lands in
    // one failures section at the end.
    let mut by_type: BTreeMap<&str, Vec<&PageRecord>> = BTreeMap::new();
    let mut failures: Vec<&PageRecord> = Vec::new();

    for record in records {
        if record.is_success() {
            by_type
                .entry(record.content_type.as_str())
                .or_default()
                .push(record);
        } else {
            failures.push(record);
        }
    }

    for (content_type, pages) in by_type.iter() {
        report.push_str(&format!("## {}\n", content_type));
        report.push_str(&format!("  {} pages\n\n", pages.len()));

        for record in pages {
            let path = extract_url_path(&record.url);
            let mut line = format!("  {} {}", status_label(record), path);

            if !record.title.is_empty() {
                line.push_str(&format!(" \x1b[90m{}\x1b[0m", record.title));
            }
            line.push_str(&format!(" \x1b[90m({} words)\x1b[0m", record.word_count));

            report.push_str(&line);
            report.push('\n');
        }
        report.push('\n');
    }

    if !failures.is_empty() {
        report.push_str("## Failures\n");
        report.push_str(&format!("  {} pages\n\n", failures.len()));

        for record in &failures {
            let path = extract_url_path(&record.url);
            let mut line = format!("  {} {}", status_label(record), path);
            if let Some(ref error) = record.error {
                line.push_str(&format!(" \x1b[90m{}\x1b[0m", error));
            }
            report.push_str(&line);
            report.push('\n');
        }
        report.push('\n');
    }

    report
}

/// Status cell for one record, color coded by outcome.
fn status_label(record: &PageRecord) -> String {
    match record.status {
        Some(code) => match code {
            100..=199 => format!("\x1b[37m{}\x1b[0m", code), // White
            200..=299 => format!("\x1b[32m{}\x1b[0m", code), // Green
            300..=399 => format!("\x1b[36m{}\x1b[0m", code), // Cyan
            400..=499 => format!("\x1b[33m{}\x1b[0m", code), // Orange/Yellow
            500..=599 => format!("\x1b[31m{}\x1b[0m", code), // Red
            _ => format!("{}", code),
        },
        None => match record.crawl_status {
            CrawlStatus::Blocked => "\x1b[33mrobots\x1b[0m".to_string(),
            _ => "\x1b[31merror\x1b[0m".to_string(),
        },
    }
}
