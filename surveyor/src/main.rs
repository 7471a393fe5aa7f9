use colored::Colorize;
use surveyor_core::print_banner;

use surveyor::commands::command_argument_builder;
use surveyor::handlers::{handle_crawl, handle_research};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    let result = match chosen_command.subcommand() {
        Some(("crawl", primary_command)) => handle_crawl(primary_command).await,
        Some(("research", primary_command)) => handle_research(primary_command).await,
        None => {
            // No subcommand provided, show usage
            let mut cmd = command_argument_builder();
            cmd.print_help().map_err(anyhow::Error::from)
        }
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(error) = result {
        eprintln!("{} {:#}", "✗".red().bold(), error);
        std::process::exit(1);
    }
}
