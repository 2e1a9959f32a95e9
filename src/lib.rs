//! Anfo: a scraper for the AnimeNfo radio song catalog
//!
//! This crate turns the radio site's semi-structured HTML pages into typed
//! [`Track`] records. It logs in, walks paginated listings, refreshes single
//! songs and snapshots the live request queue. Storage and presentation are
//! left to the caller.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod model;
pub mod normalize;

use thiserror::Error;

/// Main error type for scraping operations
///
/// Callers match on the variant to decide whether to abort, skip or retry.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Connection error for {url}: {message}")]
    Connection { url: String, message: String },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid URL {url}: {message}")]
    Url { url: String, message: String },

    #[error("HTTP client setup failed: {0}")]
    ClientSetup(reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for scraping operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Crawler, Credentials};
pub use extract::ExtractionError;
pub use model::Track;
