//! HTTP fetcher implementation
//!
//! This module is the only place page text enters the crate:
//! - building HTTP clients with the configured user agent string
//! - GET requests for public pages and for pages behind a session
//! - mapping transport faults and error statuses to [`ScrapeError::Connection`]
//!
//! Nothing here retries. A failed fetch is reported and the caller decides.

use crate::config::UserAgentConfig;
use crate::crawler::session::Session;
use crate::{Result, ScrapeError};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// `cookies` enables the in-memory cookie jar; only session clients need it.
///
/// # Example
///
/// ```no_run
/// use anfo::config::UserAgentConfig;
/// use anfo::crawler::build_http_client;
/// use std::time::Duration;
///
/// let config = UserAgentConfig {
///     crawler_name: "anfo".to_string(),
///     crawler_version: "0.1.0".to_string(),
/// };
///
/// let client = build_http_client(&config, Duration::from_secs(30), false).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
    cookies: bool,
) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .cookie_store(cookies)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues one GET per logical page
///
/// Owns the cookie-less client used for public pages. Authenticated
/// fetches go through the client of the [`Session`] passed in instead.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &UserAgentConfig, timeout: Duration) -> Result<Self> {
        let client =
            build_http_client(config, timeout, false).map_err(ScrapeError::ClientSetup)?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns the response body as text
    ///
    /// # Errors
    ///
    /// [`ScrapeError::Connection`] for network faults, timeouts, unreadable
    /// bodies and any non-success status.
    pub async fn fetch(&self, session: Option<&Session>, url: &Url) -> Result<String> {
        let client = session.map_or(&self.client, Session::client);
        tracing::debug!(
            "GET {} ({})",
            url,
            if session.is_some() { "session" } else { "public" }
        );

        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| connection_error(url, describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(connection_error(url, format!("HTTP status {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| connection_error(url, format!("failed to read body: {}", e)))
    }
}

pub(crate) fn connection_error(url: &Url, message: impl Into<String>) -> ScrapeError {
    ScrapeError::Connection {
        url: url.to_string(),
        message: message.into(),
    }
}

/// Classifies a transport error for the log line and error message
pub(crate) fn describe(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timeout".to_string()
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    }
}
