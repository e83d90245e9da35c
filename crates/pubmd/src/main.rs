//! pubmd CLI - publish a Markdown article to a content API.
//!
//! Creates the article on first run and updates it in place afterwards,
//! matching on the title derived from the Markdown file name. Every
//! setting can come from an environment variable, so the binary runs
//! unchanged as a GitHub Action step.

mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::PublishArgs;
use output::Output;

/// pubmd - Publish a Markdown article to a content API.
#[derive(Parser)]
#[command(name = "pubmd", version, about)]
struct Cli {
    #[command(flatten)]
    publish: PublishArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let config = match cli.publish.load_config() {
        Ok(config) => config,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            std::process::exit(1);
        }
    };

    // --verbose enables INFO level, the DEV environment enables DEBUG,
    // otherwise use RUST_LOG or default to WARN
    let filter = match cli.publish.log_directive(&config) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = cli.publish.execute(&config) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
