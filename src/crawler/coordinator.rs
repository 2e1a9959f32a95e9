//! Crawl orchestration
//!
//! [`Crawler`] exposes the four ways of reading the site:
//! - the full catalog, page by page, behind a session
//! - a single song's detail page
//! - the logged-in user's favorites, page by page
//! - the live request queue
//!
//! Every fetch is awaited before the next one is issued, and every crawl
//! opens its own session. Nothing is shared between two calls except the
//! public client.

use crate::config::{Config, CrawlerConfig, SiteConfig, UserAgentConfig};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::session::{open_session, Credentials, Session};
use crate::extract::{
    max_page, parse_detail_page, parse_favorites_page, parse_listing_page, parse_queue_page,
    ExtractResult,
};
use crate::model::Track;
use crate::{Result, ScrapeError};
use std::time::Duration;
use url::Url;

/// Signature shared by the paginated extractors
type PageExtractor<T> = fn(&str) -> ExtractResult<Vec<T>>;

/// Entry point for every scrape of the radio site
#[derive(Debug)]
pub struct Crawler {
    site: SiteConfig,
    settings: CrawlerConfig,
    user_agent: UserAgentConfig,
    base_url: Url,
    credentials: Option<Credentials>,
    fetcher: Fetcher,
}

impl Crawler {
    /// Creates a crawler for the configured site
    ///
    /// `credentials` may be `None` when only [`refresh_one`](Self::refresh_one)
    /// and the queue are needed.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::Url`] if the base URL does not parse, or
    /// [`ScrapeError::ClientSetup`] if the HTTP client cannot be built.
    pub fn new(config: &Config, credentials: Option<Credentials>) -> Result<Self> {
        let base_url = Url::parse(&config.site.base_url).map_err(|e| ScrapeError::Url {
            url: config.site.base_url.clone(),
            message: e.to_string(),
        })?;
        let fetcher = Fetcher::new(&config.user_agent, request_timeout(&config.crawler))?;

        Ok(Self {
            site: config.site.clone(),
            settings: config.crawler.clone(),
            user_agent: config.user_agent.clone(),
            base_url,
            credentials,
            fetcher,
        })
    }

    /// Logs in with the crawler's credentials
    pub async fn open_session(&self) -> Result<Session> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            ScrapeError::Authentication("no credentials configured".to_string())
        })?;
        let login_url = self.endpoint(&self.site.login_path)?;
        open_session(
            &self.user_agent,
            request_timeout(&self.settings),
            &login_url,
            credentials,
        )
        .await
    }

    /// Every song in the catalog, in page order
    ///
    /// Fails on the first page that cannot be fetched or parsed; records
    /// from earlier pages are dropped with it. Use
    /// [`crawl_catalog_with`](Self::crawl_catalog_with) to keep them.
    pub async fn crawl_catalog(&self) -> Result<Vec<Track>> {
        let mut tracks = Vec::new();
        self.crawl_catalog_with(|_, page| tracks.extend(page)).await?;
        Ok(tracks)
    }

    /// Walks the catalog and hands each page's records to `on_page` as soon
    /// as they are extracted
    ///
    /// Returns the number of records delivered. On error, the pages already
    /// delivered stay with the caller.
    pub async fn crawl_catalog_with<F>(&self, on_page: F) -> Result<usize>
    where
        F: FnMut(u32, Vec<Track>),
    {
        let session = self.open_session().await?;
        tracing::info!("Crawling catalog");
        self.crawl_pages(&session, &self.site.playlist_path, true, parse_listing_page, on_page)
            .await
    }

    /// Re-scrapes one song from its detail page
    ///
    /// The detail page is public. The returned track has default user
    /// fields; see [`Track::preserve_user_fields`].
    pub async fn refresh_one(&self, id: u32) -> Result<Track> {
        let url = self.songinfo_url(id)?;
        tracing::info!("Refreshing song {}", id);
        let body = self.fetcher.fetch(None, &url).await?;
        parse_detail_page(&body).map_err(|e| extraction_failed(&url, e))
    }

    /// Ids of the logged-in user's favorite songs, in page order
    pub async fn crawl_favorites(&self) -> Result<Vec<u32>> {
        let session = self.open_session().await?;
        tracing::info!("Crawling favorites of {}", session.username());

        let mut ids = Vec::new();
        self.crawl_pages(
            &session,
            &self.site.favorites_path,
            false,
            parse_favorites_page,
            |_, page| ids.extend(page),
        )
        .await?;
        Ok(ids)
    }

    /// Ids on the live request queue, soonest first
    pub async fn snapshot_queue(&self) -> Result<Vec<u32>> {
        let url = self.endpoint(&self.site.queue_path)?;
        let body = self.fetcher.fetch(None, &url).await?;
        let ids = parse_queue_page(&body).map_err(|e| extraction_failed(&url, e))?;
        tracing::info!("Queue holds {} songs", ids.len());
        Ok(ids)
    }

    /// The queue snapshot resolved to full records, one detail fetch per id
    pub async fn queue_tracks(&self) -> Result<Vec<Track>> {
        let ids = self.snapshot_queue().await?;
        let mut tracks = Vec::with_capacity(ids.len());
        for id in ids {
            self.pause().await;
            tracks.push(self.refresh_one(id).await?);
        }
        Ok(tracks)
    }

    /// Fetches page 1, discovers the page count from it, then fetches the
    /// remaining pages in order
    async fn crawl_pages<T, F>(
        &self,
        session: &Session,
        path: &str,
        ajax: bool,
        extract: PageExtractor<T>,
        mut on_page: F,
    ) -> Result<usize>
    where
        F: FnMut(u32, Vec<T>),
    {
        let first_url = self.page_url(path, 1, ajax)?;
        let first = self.fetcher.fetch(Some(session), &first_url).await?;
        let pages = max_page(&first);
        tracing::info!("{} spans {} page(s)", path, pages);

        let records = extract(&first).map_err(|e| extraction_failed(&first_url, e))?;
        if records.is_empty() {
            // A rejected login still gets a page, just without entries
            tracing::warn!("No entries on {} for {}", first_url, session.username());
            return Err(ScrapeError::Authentication(format!(
                "no entries on the first page of {} for {}: the list is empty or the login was rejected",
                path,
                session.username()
            )));
        }

        let mut total = records.len();
        on_page(1, records);

        for page in 2..=pages {
            self.pause().await;
            let url = self.page_url(path, page, ajax)?;
            let body = self.fetcher.fetch(Some(session), &url).await?;
            let records = extract(&body).map_err(|e| extraction_failed(&url, e))?;
            tracing::info!("Page {}/{}: {} records", page, pages, records.len());
            total += records.len();
            on_page(page, records);
        }

        tracing::info!("Collected {} records from {} page(s)", total, pages);
        Ok(total)
    }

    async fn pause(&self) {
        if self.settings.delay_between_pages > 0 {
            tokio::time::sleep(Duration::from_millis(self.settings.delay_between_pages)).await;
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| ScrapeError::Url {
            url: format!("{}{}", self.base_url, path),
            message: e.to_string(),
        })
    }

    /// URL of one page of a paginated listing
    pub fn page_url(&self, path: &str, page: u32, ajax: bool) -> Result<Url> {
        let mut url = self.endpoint(path)?;
        {
            let mut query = url.query_pairs_mut();
            if ajax {
                query.append_pair("ajax", "true");
            }
            query.append_pair("page", &page.to_string());
        }
        Ok(url)
    }

    /// URL of a song's detail page
    pub fn songinfo_url(&self, id: u32) -> Result<Url> {
        let mut url = self.endpoint(&self.site.songinfo_path)?;
        url.query_pairs_mut().append_pair("id", &id.to_string());
        Ok(url)
    }
}

fn request_timeout(settings: &CrawlerConfig) -> Duration {
    Duration::from_secs(settings.request_timeout)
}

fn extraction_failed(url: &Url, error: crate::ExtractionError) -> ScrapeError {
    tracing::warn!("Extraction failed on {}: {}", url, error);
    ScrapeError::Extraction(error)
}
