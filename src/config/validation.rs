use crate::config::types::{Config, CrawlerConfig, CredentialsConfig, SiteConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound for the politeness delay between pages (milliseconds)
const MAX_DELAY_BETWEEN_PAGES: u64 = 60_000;

/// Upper bound for the transport timeout (seconds)
const MAX_REQUEST_TIMEOUT: u64 = 300;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    if let Some(credentials) = &config.credentials {
        validate_credentials(credentials)?;
    }
    Ok(())
}

/// Validates site endpoints
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            config.base_url
        )));
    }

    // Url::join drops the last path segment of a base without a trailing slash
    if !base.path().ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base-url must end with '/', got '{}'",
            config.base_url
        )));
    }

    for (name, path) in [
        ("login-path", &config.login_path),
        ("playlist-path", &config.playlist_path),
        ("favorites-path", &config.favorites_path),
        ("songinfo-path", &config.songinfo_path),
        ("queue-path", &config.queue_path),
    ] {
        validate_relative_path(name, path)?;
    }

    Ok(())
}

/// Validates that a site path is non-empty and relative to the base URL
fn validate_relative_path(name: &str, path: &str) -> Result<(), ConfigError> {
    if path.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
    }

    if path.starts_with('/') || path.contains("://") {
        return Err(ConfigError::Validation(format!(
            "{} must be relative to base-url, got '{}'",
            name, path
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.delay_between_pages > MAX_DELAY_BETWEEN_PAGES {
        return Err(ConfigError::Validation(format!(
            "delay-between-pages must be <= {}ms, got {}ms",
            MAX_DELAY_BETWEEN_PAGES, config.delay_between_pages
        )));
    }

    if config.request_timeout < 1 || config.request_timeout > MAX_REQUEST_TIMEOUT {
        return Err(ConfigError::Validation(format!(
            "request-timeout must be between 1 and {} seconds, got {}",
            MAX_REQUEST_TIMEOUT, config.request_timeout
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler-version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_credentials(config: &CredentialsConfig) -> Result<(), ConfigError> {
    if config.username.trim().is_empty() {
        return Err(ConfigError::Validation(
            "credentials.username cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_base_url_requires_trailing_slash() {
        let mut site = SiteConfig::default();
        site.base_url = "https://www.animenfo.com/radio".to_string();
        assert!(matches!(
            validate_site_config(&site),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_base_url_scheme() {
        let mut site = SiteConfig::default();
        site.base_url = "ftp://www.animenfo.com/radio/".to_string();
        assert!(matches!(
            validate_site_config(&site),
            Err(ConfigError::InvalidUrl(_))
        ));

        site.base_url = "not a url".to_string();
        assert!(matches!(
            validate_site_config(&site),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_validate_relative_path() {
        assert!(validate_relative_path("queue-path", "queuelist.php").is_ok());
        assert!(validate_relative_path("queue-path", "ajax/queue.php").is_ok());

        assert!(validate_relative_path("queue-path", "").is_err());
        assert!(validate_relative_path("queue-path", "  ").is_err());
        assert!(validate_relative_path("queue-path", "/queuelist.php").is_err());
        assert!(validate_relative_path("queue-path", "https://evil.example/q.php").is_err());
    }

    #[test]
    fn test_validate_crawler_config() {
        let mut crawler = CrawlerConfig::default();
        assert!(validate_crawler_config(&crawler).is_ok());

        crawler.delay_between_pages = MAX_DELAY_BETWEEN_PAGES + 1;
        assert!(validate_crawler_config(&crawler).is_err());

        crawler.delay_between_pages = 0;
        crawler.request_timeout = 0;
        assert!(validate_crawler_config(&crawler).is_err());
    }

    #[test]
    fn test_validate_crawler_name() {
        let mut agent = UserAgentConfig::default();
        agent.crawler_name = "anfo bot".to_string();
        assert!(validate_user_agent_config(&agent).is_err());

        agent.crawler_name = String::new();
        assert!(validate_user_agent_config(&agent).is_err());

        agent.crawler_name = "anfo-bot2".to_string();
        assert!(validate_user_agent_config(&agent).is_ok());
    }

    #[test]
    fn test_validate_credentials() {
        let credentials = CredentialsConfig {
            username: " ".to_string(),
            password: None,
        };
        assert!(validate_credentials(&credentials).is_err());
    }
}
