//! Configuration module for Anfo
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use anfo::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("anfo.toml")).unwrap();
//! println!("Scraping {}", config.site.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, CredentialsConfig, SiteConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
