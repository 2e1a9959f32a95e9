//! Anfo main entry point
//!
//! Command-line front end for the scraper. Records are printed to stdout as
//! tab-separated lines; logs go to stderr.

use anfo::config::{load_config_with_hash, Config};
use anfo::{Crawler, Credentials};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable read when the config file holds no password
const PASSWORD_ENV: &str = "ANFO_PASSWORD";

/// Anfo: scraper for the AnimeNfo radio song catalog
#[derive(Parser, Debug)]
#[command(name = "anfo")]
#[command(version)]
#[command(about = "Scrapes the AnimeNfo radio song catalog", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply without one)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the whole catalog (requires credentials)
    Catalog,

    /// Re-scrape a single song from its detail page
    Refresh {
        /// Song id
        id: u32,
    },

    /// List the ids of your favorite songs (requires credentials)
    Favorites,

    /// Show the live request queue
    Queue {
        /// Print full records instead of ids
        #[arg(long)]
        resolve: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let crawler = Crawler::new(&config, credentials(&config))?;

    match cli.command {
        Command::Catalog => {
            let count = crawler
                .crawl_catalog_with(|page, tracks| {
                    tracing::debug!("Printing page {}", page);
                    for track in tracks {
                        println!("{}", track);
                    }
                })
                .await
                .context("catalog crawl failed")?;
            tracing::info!("Catalog crawl finished: {} songs", count);
        }
        Command::Refresh { id } => {
            let track = crawler
                .refresh_one(id)
                .await
                .with_context(|| format!("refreshing song {} failed", id))?;
            println!("{}", track);
        }
        Command::Favorites => {
            let ids = crawler
                .crawl_favorites()
                .await
                .context("favorites crawl failed")?;
            for id in ids {
                println!("{}", id);
            }
        }
        Command::Queue { resolve: false } => {
            let ids = crawler
                .snapshot_queue()
                .await
                .context("queue snapshot failed")?;
            for id in ids {
                println!("{}", id);
            }
        }
        Command::Queue { resolve: true } => {
            let tracks = crawler
                .queue_tracks()
                .await
                .context("resolving the queue failed")?;
            for track in tracks {
                println!("{}", track);
            }
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("anfo=info,warn"),
            1 => EnvFilter::new("anfo=debug,info"),
            2 => EnvFilter::new("anfo=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Credentials from the config file, with the password optionally taken
/// from the environment
fn credentials(config: &Config) -> Option<Credentials> {
    let section = config.credentials.as_ref()?;
    let password = section
        .password
        .clone()
        .or_else(|| std::env::var(PASSWORD_ENV).ok());

    match password {
        Some(password) => Some(Credentials::new(section.username.clone(), password)),
        None => {
            tracing::warn!(
                "No password for {} in the config or {}; authenticated commands will fail",
                section.username,
                PASSWORD_ENV
            );
            None
        }
    }
}
