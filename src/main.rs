//! Webdiver main entry point
//!
//! This is the command-line interface for the Webdiver site crawler.

use anyhow::Context;
use clap::Parser;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use webdiver::config::load_or_default;
use webdiver::crawler::crawl;
use webdiver::output::{print_banner, print_no_data, print_report, render_json};
use webdiver::url::parse_target;

/// Webdiver: one-hop website intelligence crawler
///
/// Fetches the target page, follows each internal link on it once, and
/// reports title, meta data, links, contact emails and IP information.
#[derive(Parser, Debug)]
#[command(name = "webdiver")]
#[command(version)]
#[command(about = "Website Crawler", long_about = None)]
struct Cli {
    /// Target URL to crawl
    #[arg(value_name = "URL")]
    url: String,

    /// Directory to save results
    #[arg(long, value_name = "DIR", default_value = "results")]
    output: PathBuf,

    /// Optional TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// File receiving timestamped ERROR entries (appended)
    #[arg(long, value_name = "FILE", default_value = "error.log")]
    error_log: PathBuf,

    /// Print the result as JSON instead of the colored report
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet, &cli.error_log)?;

    // Everything the crawl depends on is checked before any request is made
    let config = load_or_default(cli.config.as_deref()).context("Failed to load configuration")?;
    parse_target(&cli.url).with_context(|| format!("Invalid target URL '{}'", cli.url))?;
    std::fs::create_dir_all(&cli.output).with_context(|| {
        format!(
            "Failed to create output directory {}",
            cli.output.display()
        )
    })?;

    if !cli.json {
        print_banner();
    }

    let show_progress = !cli.quiet && !cli.json;

    match crawl(config, &cli.url, &cli.output, show_progress).await {
        Ok(emitted) => {
            if cli.json {
                println!("{}", render_json(&emitted.display)?);
            } else {
                print_report(&emitted);
            }
            tracing::info!("Meta data saved to {}", emitted.meta_file.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            // The failing component already wrote the error log entry
            tracing::warn!("Error crawling {}: {}", cli.url, e);
            print_no_data();
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Sets up the logging/tracing subscriber
///
/// Console output goes to stderr with a verbosity-based filter. A second
/// layer appends ERROR events, timestamped and without colors, to the
/// error log file.
fn setup_logging(verbose: u8, quiet: bool, error_log: &Path) -> anyhow::Result<()> {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("webdiver=info,warn"),
            1 => EnvFilter::new("webdiver=debug,info"),
            2 => EnvFilter::new("webdiver=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let error_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(error_log)
        .with_context(|| format!("Failed to open error log {}", error_log.display()))?;

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_filter(filter);

    let error_file_layer = fmt::layer()
        .with_writer(Mutex::new(error_file))
        .with_ansi(false)
        .with_target(false)
        .with_filter(LevelFilter::ERROR);

    tracing_subscriber::registry()
        .with(console)
        .with(error_file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
