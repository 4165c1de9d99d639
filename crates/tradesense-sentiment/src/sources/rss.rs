//! RSS/Atom feed collector. Needs no credentials.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use tradesense_core::NewsConfig;

use super::rss_helpers::parse_feed;
use super::{sort_dedupe_truncate, FetchRequest};
use crate::error::SentimentError;
use crate::types::Headline;

/// Polls a fixed list of feed URLs one after another.
#[derive(Debug, Clone)]
pub struct RssSource {
    client: Client,
    feeds: Vec<String>,
    delay: Duration,
    timeout: Duration,
}

impl RssSource {
    #[must_use]
    pub fn new(client: Client, feeds: Vec<String>) -> Self {
        let defaults = NewsConfig::default();
        Self {
            client,
            feeds,
            delay: Duration::from_millis(defaults.rss_feed_delay_ms),
            timeout: Duration::from_secs(defaults.rss_timeout_secs),
        }
    }

    /// Feeds, delay and timeout as configured.
    #[must_use]
    pub fn from_config(client: Client, config: &NewsConfig) -> Self {
        Self::new(client, config.rss_feeds.clone())
            .with_delay(Duration::from_millis(config.rss_feed_delay_ms))
            .with_timeout(Duration::from_secs(config.rss_timeout_secs))
    }

    /// Pause inserted between consecutive feed requests.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch every feed, keep entries inside the window, and return at most
    /// `request.limit` headlines, newest first.
    ///
    /// A feed that fails to download or parse is logged and skipped, so this
    /// only ever returns `Ok`; the `Result` keeps the adapter signatures uniform.
    ///
    /// # Errors
    ///
    /// Does not currently fail.
    pub async fn fetch(&self, request: &FetchRequest<'_>) -> Result<Vec<Headline>, SentimentError> {
        let now = Utc::now();
        let cutoff = request.cutoff(now);
        let mut items = Vec::new();

        for (i, url) in self.feeds.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            match self.fetch_feed(url, cutoff, now).await {
                Ok(feed_items) => {
                    tracing::debug!(feed = %url, count = feed_items.len(), "fetched RSS feed");
                    items.extend(feed_items);
                }
                Err(e) => {
                    tracing::warn!(feed = %url, error = %e, "RSS feed fetch failed");
                }
            }
        }

        Ok(sort_dedupe_truncate(items, Some(request.limit)))
    }

    async fn fetch_feed(
        &self,
        url: &str,
        cutoff: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Headline>, SentimentError> {
        let body = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        parse_feed(&body, url, cutoff, now)
    }
}
