use crate::CLAP_STYLING;
use clap::{arg, command};

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("surveyor")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("surveyor")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("crawl")
                .about(
                    "Crawl a website and audit its pages. Collects titles, descriptions, \
                headings, word counts and link counts for every reachable page.",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(true)
                        .help("The URL to start crawling from (https:// is assumed if no scheme is given)"),
                )
                .arg(
                    arg!(-m --"max-pages" <COUNT>)
                        .required(false)
                        .help("Maximum number of pages to crawl")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("100"),
                )
                .arg(
                    arg!(-d --"delay" <SECONDS>)
                        .required(false)
                        .help("Delay between requests, in seconds")
                        .value_parser(clap::value_parser!(f64))
                        .default_value("0.5"),
                )
                .arg(
                    arg!(--"ignore-robots")
                        .required(false)
                        .help("Crawl even when robots.txt disallows the seed URL")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"skip-blocked")
                        .required(false)
                        .help("Record robots-blocked URLs and keep crawling instead of stopping")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"keep-html")
                        .required(false)
                        .help("Keep the raw HTML of each page in memory (needed for JSON reports with keyword data)")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            command!("research")
                .about(
                    "Run keyword research over a freshly crawled site or a local text/HTML \
                file. Scores keywords by frequency, intent, difficulty and opportunity.",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(false)
                        .help("The URL to crawl for keyword research")
                        .conflicts_with("input"),
                )
                .arg(
                    arg!(-i --"input" <PATH>)
                        .required(false)
                        .help("Path to a local text or HTML file to analyze instead of crawling")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .conflicts_with("url"),
                )
                .arg(
                    arg!(-t --"top" <COUNT>)
                        .required(false)
                        .help("Number of top keywords to report")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("50"),
                )
                .arg(
                    arg!(-m --"max-pages" <COUNT>)
                        .required(false)
                        .help("Maximum number of pages to crawl")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("100"),
                )
                .arg(
                    arg!(-d --"delay" <SECONDS>)
                        .required(false)
                        .help("Delay between requests, in seconds")
                        .value_parser(clap::value_parser!(f64))
                        .default_value("0.5"),
                )
                .arg(
                    arg!(--"ignore-robots")
                        .required(false)
                        .help("Crawl even when robots.txt disallows the seed URL")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"skip-blocked")
                        .required(false)
                        .help("Record robots-blocked URLs and keep crawling instead of stopping")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
}
