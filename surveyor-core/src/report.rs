// Report generation from crawl outcomes

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

use surveyor_crawler::{CrawlOutcome, CrawlStatus, PageRecord};

use crate::audit::{self, DuplicateReport, DuplicateRow, SiteSummary};
use crate::error::Result;
use crate::keywords::KeywordReport;
use crate::organic::PageCandidates;

const RULE: &str =
    "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const LIGHT_RULE: &str =
    "────────────────────────────────────────────────────────────────────────────────";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Everything a crawl report is built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub seed_url: String,
    pub pages_crawled: usize,
    pub blocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robots_url: Option<String>,
    pub summary: SiteSummary,
    pub duplicates: DuplicateReport,
    pub records: Vec<PageRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<KeywordReport>,
}

/// Assembles report data from a crawl outcome, running the duplicate and
/// summary audits on the way.
pub fn gather_report_data(
    seed_url: &str,
    outcome: &CrawlOutcome,
    keywords: Option<KeywordReport>,
) -> ReportData {
    ReportData {
        seed_url: seed_url.to_string(),
        pages_crawled: outcome.records.len(),
        blocked: outcome.blocked,
        robots_url: outcome.robots_url.clone(),
        summary: audit::summarize(&outcome.records),
        duplicates: audit::find_duplicates(&outcome.records),
        records: outcome.records.clone(),
        keywords,
    }
}

pub fn generate_text_report(data: &ReportData) -> String {
    let mut report = String::new();

    // Header
    report.push_str(RULE);
    report.push('\n');
    report.push_str("                           SURVEYOR SEO CRAWL REPORT\n");
    report.push_str(RULE);
    report.push_str("\n\n");

    report.push_str(&format!("Seed URL:     {}\n", data.seed_url));
    report.push_str(&format!("Generated:    {}\n", format_generated_at()));
    report.push_str(&format!("Pages:        {}\n", data.pages_crawled));
    report.push_str(&format!("Successful:   {}\n", data.summary.successful));
    report.push_str(&format!("Errors:       {}\n", data.summary.errors));
    if data.blocked {
        report.push_str(&format!(
            "Blocked:      crawl stopped by {}\n",
            data.robots_url.as_deref().unwrap_or("robots.txt")
        ));
    }
    report.push('\n');

    // Site summary
    report.push_str(RULE);
    report.push_str("\nSITE SUMMARY\n");
    report.push_str(RULE);
    report.push_str("\n\n");
    report.push_str(&format!(
        "Avg Title Length:        {} chars\n",
        data.summary.avg_title_length
    ));
    report.push_str(&format!(
        "Avg Description Length:  {} chars\n",
        data.summary.avg_description_length
    ));
    report.push_str(&format!(
        "Avg Word Count:          {}\n",
        data.summary.avg_word_count
    ));
    report.push_str(&format!(
        "Avg Crawl Time:          {:.2}s\n",
        data.summary.avg_crawl_time
    ));
    report.push('\n');

    // Duplicate content
    report.push_str(RULE);
    report.push_str("\nDUPLICATE CONTENT\n");
    report.push_str(RULE);
    report.push_str("\n\n");
    if data.duplicates.is_empty() {
        report.push_str("No duplicate titles, descriptions, or H1s found.\n\n");
    } else {
        push_duplicate_section(&mut report, "Duplicate Titles", &data.duplicates.titles);
        push_duplicate_section(
            &mut report,
            "Duplicate Descriptions",
            &data.duplicates.descriptions,
        );
        push_duplicate_section(&mut report, "Duplicate H1s", &data.duplicates.h1s);
    }

    // Per-page details
    if !data.records.is_empty() {
        report.push_str(RULE);
        report.push_str("\nPAGE DETAILS\n");
        report.push_str(RULE);
        report.push_str("\n\n");

        for (idx, record) in data.records.iter().enumerate() {
            report.push_str(&format!("[{}] {}\n", idx + 1, record.url));
            push_record_details(&mut report, record);
            report.push_str(LIGHT_RULE);
            report.push_str("\n\n");
        }
    }

    // Keyword research, when the caller ran it
    if let Some(ref keywords) = data.keywords {
        report.push_str(&keyword_sections(keywords));
    }

    report.push_str(&footer());
    report
}

fn push_duplicate_section(report: &mut String, label: &str, rows: &[DuplicateRow]) {
    report.push_str(&format!("{}: {}\n", label, rows.len()));
    for row in rows {
        report.push_str(&format!("  {}\n", row.url));
        report.push_str(&format!("    {}\n", row.value));
    }
    report.push('\n');
}

fn push_record_details(report: &mut String, record: &PageRecord) {
    match record.crawl_status {
        CrawlStatus::Success => {
            report.push_str(&format!(
                "Status:       {} (Success)\n",
                record.status.unwrap_or(0)
            ));
            if record.title.is_empty() {
                report.push_str("Title:        (none)\n");
            } else {
                report.push_str(&format!(
                    "Title:        {} ({} chars)\n",
                    record.title, record.title_length
                ));
            }
            if record.description.is_empty() {
                report.push_str("Description:  (none)\n");
            } else {
                report.push_str(&format!(
                    "Description:  ({} chars)\n",
                    record.description_length
                ));
                report.push_str(&wrap_text(&record.description, 80, "  "));
            }
            if record.h1.is_empty() {
                report.push_str("H1:           (none)\n");
            } else {
                report.push_str(&format!("H1:           {}\n", record.h1));
            }
            report.push_str(&format!(
                "Words:        {} | Internal links: {} | External links: {} | Ratio: {:.3}\n",
                record.word_count,
                record.internal_links,
                record.external_links,
                record.link_to_word_ratio
            ));
            report.push_str(&format!(
                "Type:         {} | MIME: {} | Fetched in {:.2}s\n",
                record.content_type, record.mime_type, record.crawl_time
            ));
            if !record.schema.is_empty() {
                report.push_str(&format!("Schema:       {}\n", record.schema));
            }
        }
        CrawlStatus::HttpError => {
            report.push_str(&format!(
                "Status:       {} (HTTP Error)\n",
                record.status.unwrap_or(0)
            ));
            report.push_str(&format!(
                "MIME:         {} | Fetched in {:.2}s\n",
                record.mime_type, record.crawl_time
            ));
        }
        CrawlStatus::Error => {
            report.push_str("Status:       Error\n");
            report.push_str(&format!(
                "Error:        {}\n",
                record.error.as_deref().unwrap_or("unknown")
            ));
        }
        CrawlStatus::Blocked => {
            report.push_str("Status:       Blocked by robots.txt\n");
        }
    }
}

/// Text report for a research run that has no crawl behind it, or whose
/// crawl details the caller does not want repeated.
pub fn generate_keyword_text_report(
    source: &str,
    keywords: &KeywordReport,
    candidates: Option<&[PageCandidates]>,
) -> String {
    let mut report = String::new();

    report.push_str(RULE);
    report.push('\n');
    report.push_str("                        SURVEYOR KEYWORD RESEARCH REPORT\n");
    report.push_str(RULE);
    report.push_str("\n\n");

    report.push_str(&format!("Source:       {}\n", source));
    report.push_str(&format!("Generated:    {}\n", format_generated_at()));
    report.push('\n');

    report.push_str(&keyword_sections(keywords));

    if let Some(candidates) = candidates {
        report.push_str(&candidate_section(candidates));
    }

    report.push_str(&footer());
    report
}

fn keyword_sections(keywords: &KeywordReport) -> String {
    let mut section = String::new();

    section.push_str(RULE);
    section.push_str("\nKEYWORD RESEARCH\n");
    section.push_str(RULE);
    section.push_str("\n\n");

    section.push_str(&format!("Total Keywords:   {}\n", keywords.total_keywords));
    section.push_str(&format!("Unique Keywords:  {}\n", keywords.unique_keywords));
    if let Some(intent) = keywords.dominant_intent() {
        section.push_str(&format!("Dominant Intent:  {}\n", intent));
    }
    section.push('\n');

    if keywords.is_empty() {
        section.push_str("No keywords could be extracted.\n\n");
        return section;
    }

    section.push_str("Top Keywords:\n");
    for (idx, row) in keywords.frequency.iter().enumerate() {
        section.push_str(&format!(
            "  {:>3}. {:<30} {:>5}  {:>6.2}%\n",
            idx + 1,
            row.keyword,
            row.frequency,
            row.percentage
        ));
    }
    section.push('\n');

    section.push_str("Search Intent:\n");
    for share in &keywords.intent_summary {
        section.push_str(&format!(
            "  {:<15} {:>5}  ({:.1}%)\n",
            share.intent.as_str(),
            share.count,
            share.percentage
        ));
    }
    section.push('\n');

    section.push_str("Top Opportunities:\n");
    for (idx, row) in keywords.top_opportunities(10).iter().enumerate() {
        section.push_str(&format!(
            "  {:>3}. {:<30} {:>5.1}  {:<6}  difficulty {:.1} ({})\n",
            idx + 1,
            row.keyword,
            row.opportunity.score,
            row.opportunity.priority.as_str(),
            row.difficulty.score,
            row.difficulty.level.as_str()
        ));
    }
    section.push('\n');

    section.push_str("Keyword Clusters:\n");
    if keywords.clusters.is_empty() {
        section.push_str("  (none)\n");
    } else {
        for (leader, members) in &keywords.clusters {
            section.push_str(&format!("  {}: {}\n", leader, members.join(", ")));
        }
    }
    section.push('\n');

    section
}

fn candidate_section(candidates: &[PageCandidates]) -> String {
    let mut section = String::new();

    section.push_str(RULE);
    section.push_str("\nPAGE RANKING CANDIDATES\n");
    section.push_str(RULE);
    section.push_str("\n\n");

    for page in candidates {
        section.push_str(&format!("{}\n", page.url));
        section.push_str(&format!("  Intent: {}\n", page.intent));
        if page.terms.is_empty() {
            section.push_str("  Terms:  (none)\n");
        } else {
            let terms: Vec<String> = page
                .terms
                .iter()
                .map(|t| format!("{} ({:.3})", t.term, t.score))
                .collect();
            section.push_str(&format!("  Terms:  {}\n", terms.join(", ")));
        }
        section.push('\n');
    }

    section
}

pub fn generate_json_report(data: &ReportData) -> Result<String> {
    // Structured JSON report with metadata alongside the crawl data
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Surveyor",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "crawl": data
        }
    });

    Ok(serde_json::to_string_pretty(&json_report)?)
}

pub fn generate_keyword_json_report(
    source: &str,
    keywords: &KeywordReport,
    candidates: Option<&[PageCandidates]>,
) -> Result<String> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Surveyor",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json",
                "source": source
            },
            "keywords": keywords,
            "candidates": candidates
        }
    });

    Ok(serde_json::to_string_pretty(&json_report)?)
}

/// Writes report content to a file, expanding a leading `~`.
pub fn save_report(content: &str, path: &str) -> Result<()> {
    let expanded = shellexpand::tilde(path);
    let mut file = File::create(expanded.as_ref())?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn format_generated_at() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn footer() -> String {
    let mut footer = String::new();
    footer.push_str(RULE);
    footer.push('\n');
    footer.push_str("                                End of Report\n");
    footer.push_str(RULE);
    footer.push('\n');
    footer.push_str("\nGenerated by Surveyor - SEO site crawler and keyword research\n");
    footer.push_str("Crawl responsibly.\n\n");
    footer
}

fn wrap_text(text: &str, width: usize, indent: &str) -> String {
    let mut result = String::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.len() + word.len() + 1 > width - indent.len() {
            if !current_line.is_empty() {
                result.push_str(indent);
                result.push_str(&current_line);
                result.push('\n');
                current_line.clear();
            }
        }

        if !current_line.is_empty() {
            current_line.push(' ');
        }
        current_line.push_str(word);
    }

    if !current_line.is_empty() {
        result.push_str(indent);
        result.push_str(&current_line);
        result.push('\n');
    }

    result
}
