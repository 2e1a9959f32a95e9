//! Crawler module for talking to the radio site
//!
//! This module contains the network side of the crate:
//! - logging in and holding the session cookie
//! - fetching page text, with or without a session
//! - orchestrating paginated crawls over the extractors

mod coordinator;
mod fetcher;
mod session;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, Fetcher};
pub use session::{open_session, Credentials, Session};
