//! Logged-in sessions
//!
//! The site keeps login state in a cookie. A [`Session`] owns a client with
//! its own cookie jar, so two sessions never share login state.

use crate::config::UserAgentConfig;
use crate::crawler::fetcher::{build_http_client, connection_error, describe};
use crate::{Result, ScrapeError};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Account used for the authenticated crawls
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Authenticated request context for one login
#[derive(Debug)]
pub struct Session {
    client: Client,
    username: String,
}

impl Session {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }
}

/// Logs in and returns the session carrying the login cookie
///
/// The site answers a rejected login with an ordinary page, so success here
/// only means the request went through. Bad credentials show up later as a
/// listing page without entries.
///
/// # Errors
///
/// - [`ScrapeError::Authentication`] if the login endpoint answers 401 or 403
/// - [`ScrapeError::Connection`] for transport faults and other error statuses
pub async fn open_session(
    user_agent: &UserAgentConfig,
    timeout: Duration,
    login_url: &Url,
    credentials: &Credentials,
) -> Result<Session> {
    let client = build_http_client(user_agent, timeout, true).map_err(ScrapeError::ClientSetup)?;

    tracing::info!("Logging in as {}", credentials.username);
    let response = client
        .post(login_url.clone())
        .form(&[
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ])
        .send()
        .await
        .map_err(|e| connection_error(login_url, describe(&e)))?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        tracing::warn!("Login rejected for {} ({})", credentials.username, status);
        return Err(ScrapeError::Authentication(format!(
            "login rejected for {} with HTTP status {}",
            credentials.username, status
        )));
    }
    if !status.is_success() {
        return Err(connection_error(login_url, format!("HTTP status {}", status)));
    }

    Ok(Session {
        client,
        username: credentials.username.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_password() {
        let credentials = Credentials::new("listener", "hunter2");
        let shown = format!("{:?}", credentials);
        assert!(shown.contains("listener"));
        assert!(!shown.contains("hunter2"));
    }
}
