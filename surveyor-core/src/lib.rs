//! Core library for Surveyor.
//!
//! Takes the page records produced by `surveyor-crawler` and turns them into
//! something a human can act on: duplicate content audits, site summaries,
//! keyword frequency and intent analysis, opportunity scores, TF-IDF page
//! candidates, and text/JSON reports.

use colored::Colorize;

pub mod audit;
pub mod cluster;
pub mod crawl;
pub mod error;
pub mod frequency;
pub mod intent;
pub mod keywords;
pub mod opportunity;
pub mod organic;
pub mod report;
pub mod store;
pub mod tfidf;

pub use audit::{DuplicateReport, DuplicateRow, SiteSummary};
pub use error::AnalysisError;
pub use frequency::KeywordFrequency;
pub use intent::{Intent, IntentShare, KeywordIntent};
pub use keywords::KeywordReport;
pub use opportunity::{
    DifficultyEstimate, DifficultyLevel, OpportunityRow, OpportunityScore, Priority,
};
pub use organic::{PageCandidates, PageText};
pub use report::{ReportData, ReportFormat};
pub use store::ResultStore;
pub use tfidf::{TermScore, TfidfExtractor};

/// Prints the startup banner.
pub fn print_banner() {
    println!();
    println!("{}", "  surveyor".bright_cyan().bold());
    println!(
        "  {}",
        format!(
            "SEO site crawler and keyword research, v{}",
            env!("CARGO_PKG_VERSION")
        )
        .bright_black()
    );
    println!();
}
