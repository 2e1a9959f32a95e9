use serde::Deserialize;
use std::fmt;

/// Main configuration structure for Anfo
///
/// Every section is optional; missing sections fall back to the live site's
/// defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub credentials: Option<CredentialsConfig>,
}

/// Endpoints of the radio site
///
/// Paths are joined onto `base_url`, so the base must end with a slash.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    #[serde(rename = "login-path", default = "default_login_path")]
    pub login_path: String,

    /// Paginated catalog listing
    #[serde(rename = "playlist-path", default = "default_playlist_path")]
    pub playlist_path: String,

    /// Paginated favorites listing of the logged-in user
    #[serde(rename = "favorites-path", default = "default_favorites_path")]
    pub favorites_path: String,

    /// Single song detail page, takes an `id` query parameter
    #[serde(rename = "songinfo-path", default = "default_songinfo_path")]
    pub songinfo_path: String,

    /// Live request queue
    #[serde(rename = "queue-path", default = "default_queue_path")]
    pub queue_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login_path: default_login_path(),
            playlist_path: default_playlist_path(),
            favorites_path: default_favorites_path(),
            songinfo_path: default_songinfo_path(),
            queue_path: default_queue_path(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Pause between two page fetches of the same crawl (milliseconds)
    #[serde(rename = "delay-between-pages", default = "default_delay_between_pages")]
    pub delay_between_pages: u64,

    /// Transport timeout for a single request (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            delay_between_pages: default_delay_between_pages(),
            request_timeout: default_request_timeout(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

/// Login credentials for the authenticated crawls
#[derive(Clone, Deserialize)]
pub struct CredentialsConfig {
    pub username: String,

    /// Left out of the file, the CLI reads it from the environment
    #[serde(default)]
    pub password: Option<String>,
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn default_base_url() -> String {
    "https://www.animenfo.com/radio/".to_string()
}

fn default_login_path() -> String {
    "login.php".to_string()
}

fn default_playlist_path() -> String {
    "playlist.php".to_string()
}

fn default_favorites_path() -> String {
    "favorites.php".to_string()
}

fn default_songinfo_path() -> String {
    "songinfo.php".to_string()
}

fn default_queue_path() -> String {
    "queuelist.php".to_string()
}

fn default_delay_between_pages() -> u64 {
    500
}

fn default_request_timeout() -> u64 {
    30
}

fn default_crawler_name() -> String {
    "anfo".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
