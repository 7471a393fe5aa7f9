pub mod commands;
pub mod handlers;

// Re-export the helpers the binary and integration tests share.
pub use handlers::normalize_seed_url;

// Re-export crawl functionality from surveyor-core
pub use surveyor_core::crawl::{CrawlOptions, execute_crawl, generate_crawl_report};

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
