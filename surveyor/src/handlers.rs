use anyhow::{Context, bail};
use clap::ArgMatches;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use surveyor_core::crawl::{CrawlOptions, execute_crawl, generate_crawl_report};
use surveyor_core::keywords::{extract_keywords, generate_keyword_report};
use surveyor_core::organic::{PageCandidates, analyze_organic_candidates, extract_page_text};
use surveyor_core::report::{
    ReportFormat, gather_report_data, generate_json_report, generate_keyword_json_report,
    generate_keyword_text_report, generate_text_report, save_report,
};
use surveyor_crawler::{CrawlOutcome, CrawlStatus};

/// Top TF-IDF terms reported per page candidate.
const CANDIDATE_TERMS: usize = 10;

/// Bring a user-supplied URL into crawlable form.
///
/// Bare domains get `https://` prepended. The validated URL is returned as
/// entered, so paths and ports survive untouched.
pub fn normalize_seed_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("no URL given");
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let parsed = Url::parse(&candidate).with_context(|| format!("invalid URL '{}'", trimmed))?;
    if parsed.host_str().is_none() {
        bail!("URL '{}' has no host to crawl", trimmed);
    }

    Ok(candidate)
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn print_crawl_config(seed_url: &str, max_pages: usize, delay_secs: f64, ignore_robots: bool) {
    println!("{} Seed: {}", "→".blue(), seed_url.bright_white());
    println!(
        "{} Max pages: {} | Delay: {}s",
        "→".blue(),
        max_pages,
        delay_secs
    );
    if ignore_robots {
        println!(
            "{} robots.txt directives will be ignored",
            "⚠".yellow().bold()
        );
    }
    println!();
}

fn report_format(sub_matches: &ArgMatches) -> ReportFormat {
    sub_matches
        .get_one::<String>("format")
        .and_then(|s| ReportFormat::from_str(s))
        .unwrap_or(ReportFormat::Text)
}

/// Runs the crawl and reports a robots.txt stop to the user.
///
/// Returns `None` when the crawl was blocked outright, in which case the
/// caller has nothing to report on.
async fn crawl_site(options: CrawlOptions) -> anyhow::Result<Option<CrawlOutcome>> {
    let outcome = execute_crawl(options).await.context("crawl failed")?;

    if outcome.blocked {
        println!();
        println!(
            "{} Crawl blocked by {}",
            "✗".red().bold(),
            outcome
                .robots_url
                .as_deref()
                .unwrap_or("robots.txt")
                .bright_white()
        );
        println!("  Re-run with --ignore-robots to crawl anyway, or --skip-blocked to");
        println!("  record blocked URLs and continue.");
        return Ok(None);
    }

    Ok(Some(outcome))
}

fn write_report(content: &str, path: &Path) -> anyhow::Result<()> {
    let path_str = path.display().to_string();
    save_report(content, &path_str)
        .with_context(|| format!("failed to save report to {}", path_str))?;
    println!(
        "{} Report saved to {}",
        "✓".green().bold(),
        path_str.bright_white()
    );
    Ok(())
}

pub async fn handle_crawl(sub_matches: &ArgMatches) -> anyhow::Result<()> {
    let seed_url = normalize_seed_url(sub_matches.get_one::<String>("url").unwrap())?;
    let max_pages = *sub_matches.get_one::<usize>("max-pages").unwrap();
    let delay_secs = *sub_matches.get_one::<f64>("delay").unwrap();
    let ignore_robots = sub_matches.get_flag("ignore-robots");
    let skip_blocked = sub_matches.get_flag("skip-blocked");
    let keep_html = sub_matches.get_flag("keep-html");
    let output = sub_matches.get_one::<PathBuf>("output");
    let format = report_format(sub_matches);

    print_divider();
    println!("{}", "  SITE CRAWL".bright_white().bold());
    print_divider();
    println!();
    print_crawl_config(&seed_url, max_pages, delay_secs, ignore_robots);

    let options = CrawlOptions {
        seed_url: seed_url.clone(),
        max_pages,
        delay_secs,
        ignore_robots,
        skip_blocked,
        keep_html,
        show_progress_bar: true,
    };

    let Some(outcome) = crawl_site(options).await? else {
        return Ok(());
    };

    println!();
    println!(
        "{} Crawl complete: {} pages",
        "✓".green().bold(),
        outcome.records.len()
    );
    let blocked_pages = outcome
        .records
        .iter()
        .filter(|r| r.crawl_status == CrawlStatus::Blocked)
        .count();
    if blocked_pages > 0 {
        println!(
            "{} {} URLs were blocked by robots.txt and skipped",
            "⚠".yellow().bold(),
            blocked_pages
        );
    }
    println!();

    match output {
        None => {
            let report = generate_crawl_report(&outcome.records);
            print!("{}", report);
        }
        Some(path) => {
            let data = gather_report_data(&seed_url, &outcome, None);
            let content = match format {
                ReportFormat::Text => generate_text_report(&data),
                ReportFormat::Json => generate_json_report(&data)?,
            };
            write_report(&content, path)?;
        }
    }

    Ok(())
}

pub async fn handle_research(sub_matches: &ArgMatches) -> anyhow::Result<()> {
    let top_n = *sub_matches.get_one::<usize>("top").unwrap();
    let output = sub_matches.get_one::<PathBuf>("output");
    let format = report_format(sub_matches);

    print_divider();
    println!("{}", "  KEYWORD RESEARCH".bright_white().bold());
    print_divider();
    println!();

    let (source, keywords, candidates) =
        if let Some(input) = sub_matches.get_one::<PathBuf>("input") {
            research_from_file(input)?
        } else if let Some(raw_url) = sub_matches.get_one::<String>("url") {
            match research_from_crawl(raw_url, sub_matches).await? {
                Some(inputs) => inputs,
                None => return Ok(()),
            }
        } else {
            bail!("either --url or --input must be provided");
        };

    if keywords.is_empty() {
        println!(
            "{} No keywords could be extracted from {}",
            "⚠".yellow().bold(),
            source.bright_white()
        );
        return Ok(());
    }

    tracing::debug!(keywords = keywords.len(), "scoring keyword corpus");
    let keyword_report = generate_keyword_report(&keywords, top_n);

    let content = match format {
        ReportFormat::Text => {
            generate_keyword_text_report(&source, &keyword_report, candidates.as_deref())
        }
        ReportFormat::Json => {
            generate_keyword_json_report(&source, &keyword_report, candidates.as_deref())?
        }
    };

    match output {
        None => print!("{}", content),
        Some(path) => write_report(&content, path)?,
    }

    Ok(())
}

type ResearchInputs = (String, Vec<String>, Option<Vec<PageCandidates>>);

/// Keyword corpus from a local text or HTML file.
fn research_from_file(path: &Path) -> anyhow::Result<ResearchInputs> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    println!(
        "{} Analyzing {}",
        "→".blue(),
        path.display().to_string().bright_white()
    );
    println!();

    // Works for plain text too: extraction passes non-HTML input through.
    let keywords = extract_keywords(&extract_page_text(&content).body);
    Ok((path.display().to_string(), keywords, None))
}

/// Keyword corpus from a fresh crawl of the given site.
async fn research_from_crawl(
    raw_url: &str,
    sub_matches: &ArgMatches,
) -> anyhow::Result<Option<ResearchInputs>> {
    let seed_url = normalize_seed_url(raw_url)?;
    let max_pages = *sub_matches.get_one::<usize>("max-pages").unwrap();
    let delay_secs = *sub_matches.get_one::<f64>("delay").unwrap();
    let ignore_robots = sub_matches.get_flag("ignore-robots");
    let skip_blocked = sub_matches.get_flag("skip-blocked");

    print_crawl_config(&seed_url, max_pages, delay_secs, ignore_robots);

    // Keyword extraction reads the page bodies, so HTML is always retained.
    let options = CrawlOptions {
        seed_url: seed_url.clone(),
        max_pages,
        delay_secs,
        ignore_robots,
        skip_blocked,
        keep_html: true,
        show_progress_bar: true,
    };

    let Some(outcome) = crawl_site(options).await? else {
        return Ok(None);
    };

    println!();
    println!(
        "{} Crawled {} pages",
        "✓".green().bold(),
        outcome.records.len()
    );
    println!();

    let mut keywords = Vec::new();
    for record in &outcome.records {
        if let Some(html) = record.html.as_deref() {
            keywords.extend(extract_keywords(&extract_page_text(html).body));
        }
    }
    let candidates = analyze_organic_candidates(&outcome.records, CANDIDATE_TERMS);

    Ok(Some((seed_url, keywords, Some(candidates))))
}
