//! Asura Adapter command-line driver
//!
//! Runs one adapter operation and prints the resulting records as JSON.

use anyhow::Context;
use asura_adapter::config::Config;
use asura_adapter::{AsuraAdapter, RequestContext};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Asura Adapter: scrape series, chapters and pages from Asura Scans
#[derive(Parser, Debug)]
#[command(name = "asura-adapter")]
#[command(version)]
#[command(about = "Content adapter for Asura Scans", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    /// Report failures as errors instead of printing an empty result
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search series by name
    Search {
        /// Free-text query
        query: String,

        /// Language filter (the site only publishes in English)
        #[arg(long)]
        language: Option<String>,
    },

    /// Show the details of a series
    Manga {
        /// Series page URL
        url: String,
    },

    /// List the chapters of a series
    Chapters {
        /// Series page URL
        url: String,

        /// Extra context echoed back on every chapter, as a JSON object
        #[arg(long, value_name = "JSON")]
        arguments: Option<String>,
    },

    /// List the page images of a chapter (requires Chrome/Chromium)
    Pages {
        /// Chapter page URL
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let adapter = match &cli.config {
        Some(path) => AsuraAdapter::from_config_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => AsuraAdapter::new(&Config::default()).context("Failed to create adapter")?,
    };

    match cli.command {
        Command::Search { query, language } => {
            let results = if cli.strict {
                adapter.try_search(&query, language.as_deref()).await?
            } else {
                adapter.search(&query, language.as_deref()).await
            };
            print_json(&results)
        }
        Command::Manga { url } => {
            let context = RequestContext::with_url(url);
            let manga = if cli.strict {
                Some(adapter.try_get_manga(&context).await?)
            } else {
                adapter.get_manga(&context).await
            };
            print_json(&manga)
        }
        Command::Chapters { url, arguments } => {
            let mut context = match arguments {
                Some(json) => serde_json::from_str::<RequestContext>(&json)
                    .context("--arguments must be a JSON object")?,
                None => RequestContext::default(),
            };
            context.url = Some(url);

            let chapters = if cli.strict {
                adapter.try_get_chapters(&context).await?
            } else {
                adapter.get_chapters(&context).await
            };
            print_json(&chapters)
        }
        Command::Pages { url } => {
            let context = RequestContext::with_url(url);
            let pages = if cli.strict {
                adapter.try_get_pages(&context).await?
            } else {
                adapter.get_pages(&context).await
            };
            print_json(&pages)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("asura_adapter=info,warn"),
            1 => EnvFilter::new("asura_adapter=debug,info"),
            2 => EnvFilter::new("asura_adapter=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
