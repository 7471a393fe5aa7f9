use std::fs;
use std::path::PathBuf;

use surveyor::commands::command_argument_builder;
use surveyor::handlers::{handle_research, normalize_seed_url};

#[test]
fn test_normalize_seed_url_keeps_scheme() {
    assert_eq!(
        normalize_seed_url("https://example.com").unwrap(),
        "https://example.com"
    );
}

#[test]
fn test_normalize_seed_url_prepends_https() {
    assert_eq!(
        normalize_seed_url("example.com").unwrap(),
        "https://example.com"
    );
}

#[test]
fn test_normalize_seed_url_trims_whitespace() {
    assert_eq!(
        normalize_seed_url("  example.com  ").unwrap(),
        "https://example.com"
    );
}

#[test]
fn test_normalize_seed_url_keeps_port_and_path() {
    assert_eq!(
        normalize_seed_url("example.com:8080/blog?page=2").unwrap(),
        "https://example.com:8080/blog?page=2"
    );
}

#[test]
fn test_normalize_seed_url_rejects_empty() {
    assert!(normalize_seed_url("").is_err());
    assert!(normalize_seed_url("   ").is_err());
}

#[test]
fn test_normalize_seed_url_rejects_garbage() {
    assert!(normalize_seed_url("not a valid url!!!").is_err());
}

#[test]
fn test_normalize_seed_url_rejects_hostless_urls() {
    assert!(normalize_seed_url("file:///tmp/notes.txt").is_err());
}

#[test]
fn test_crawl_defaults() {
    let matches = command_argument_builder()
        .try_get_matches_from(["surveyor", "crawl", "-u", "example.com"])
        .unwrap();
    let (name, sub) = matches.subcommand().unwrap();

    assert_eq!(name, "crawl");
    assert_eq!(sub.get_one::<String>("url").unwrap(), "example.com");
    assert_eq!(*sub.get_one::<usize>("max-pages").unwrap(), 100);
    assert_eq!(*sub.get_one::<f64>("delay").unwrap(), 0.5);
    assert!(!sub.get_flag("ignore-robots"));
    assert!(!sub.get_flag("skip-blocked"));
    assert!(!sub.get_flag("keep-html"));
    assert!(sub.get_one::<PathBuf>("output").is_none());
    assert_eq!(sub.get_one::<String>("format").unwrap(), "text");
}

#[test]
fn test_crawl_requires_url() {
    let result = command_argument_builder().try_get_matches_from(["surveyor", "crawl"]);
    assert!(result.is_err());
}

#[test]
fn test_crawl_parses_all_flags() {
    let matches = command_argument_builder()
        .try_get_matches_from([
            "surveyor",
            "crawl",
            "-u",
            "https://example.com",
            "-m",
            "25",
            "-d",
            "1.5",
            "--ignore-robots",
            "--skip-blocked",
            "--keep-html",
            "-o",
            "report.json",
            "-f",
            "json",
        ])
        .unwrap();
    let (_, sub) = matches.subcommand().unwrap();

    assert_eq!(*sub.get_one::<usize>("max-pages").unwrap(), 25);
    assert_eq!(*sub.get_one::<f64>("delay").unwrap(), 1.5);
    assert!(sub.get_flag("ignore-robots"));
    assert!(sub.get_flag("skip-blocked"));
    assert!(sub.get_flag("keep-html"));
    assert_eq!(
        sub.get_one::<PathBuf>("output").unwrap(),
        &PathBuf::from("report.json")
    );
    assert_eq!(sub.get_one::<String>("format").unwrap(), "json");
}

#[test]
fn test_crawl_rejects_unknown_format() {
    let result = command_argument_builder().try_get_matches_from([
        "surveyor", "crawl", "-u", "example.com", "-f", "csv",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_research_url_and_input_conflict() {
    let result = command_argument_builder().try_get_matches_from([
        "surveyor",
        "research",
        "-u",
        "example.com",
        "-i",
        "notes.txt",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_research_defaults() {
    let matches = command_argument_builder()
        .try_get_matches_from(["surveyor", "research", "-i", "notes.txt"])
        .unwrap();
    let (name, sub) = matches.subcommand().unwrap();

    assert_eq!(name, "research");
    assert_eq!(*sub.get_one::<usize>("top").unwrap(), 50);
    assert_eq!(*sub.get_one::<usize>("max-pages").unwrap(), 100);
    assert!(sub.get_one::<String>("url").is_none());
}

#[test]
fn test_quiet_flag() {
    let matches = command_argument_builder()
        .try_get_matches_from(["surveyor", "-q"])
        .unwrap();
    assert!(matches.get_flag("quiet"));

    let matches = command_argument_builder()
        .try_get_matches_from(["surveyor"])
        .unwrap();
    assert!(!matches.get_flag("quiet"));
}

/// Parses a full command line and clones out the subcommand matches.
fn research_args(args: &[&str]) -> clap::ArgMatches {
    let matches = command_argument_builder()
        .try_get_matches_from(args)
        .unwrap();
    let (_, sub) = matches.subcommand().unwrap();
    sub.clone()
}

#[tokio::test]
async fn test_research_from_html_file_writes_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("page.html");
    fs::write(
        &input,
        "<html><head><title>Crawler Guide</title></head>\
         <body><p>crawler basics and crawler etiquette for sitemap owners</p></body></html>",
    )
    .unwrap();
    let output = dir.path().join("research.json");

    let sub = research_args(&[
        "surveyor",
        "research",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "-f",
        "json",
    ]);
    handle_research(&sub).await.unwrap();

    let written = fs::read_to_string(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();

    assert_eq!(value["report"]["metadata"]["generator"], "Surveyor");
    assert_eq!(
        value["report"]["metadata"]["source"],
        input.display().to_string()
    );
    // "and"/"for" are stopwords; the title tokens count too.
    assert_eq!(value["report"]["keywords"]["total_keywords"], 8);
    assert_eq!(
        value["report"]["keywords"]["frequency"][0]["keyword"],
        "crawler"
    );
    assert_eq!(value["report"]["keywords"]["frequency"][0]["frequency"], 3);
    assert!(value["report"]["candidates"].is_null());
}

#[tokio::test]
async fn test_research_from_plain_text_file_writes_text_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    fs::write(
        &input,
        "keyword research for content strategy and keyword clustering",
    )
    .unwrap();
    let output = dir.path().join("research.txt");

    let sub = research_args(&[
        "surveyor",
        "research",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    handle_research(&sub).await.unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("SURVEYOR KEYWORD RESEARCH REPORT"));
    assert!(written.contains("Total Keywords:   6"));
    assert!(written.contains("keyword"));
}

#[tokio::test]
async fn test_research_missing_input_file_fails() {
    let sub = research_args(&["surveyor", "research", "-i", "/definitely/not/here.html"]);
    let result = handle_research(&sub).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_research_empty_file_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.txt");
    fs::write(&input, "").unwrap();
    let output = dir.path().join("should-not-exist.txt");

    let sub = research_args(&[
        "surveyor",
        "research",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    handle_research(&sub).await.unwrap();

    assert!(!output.exists());
}
