//! Fan-in of every headline source into one deduplicated, recency-ordered list.

use std::time::Duration;

use reqwest::Client;
use tradesense_core::NewsConfig;

use crate::dedupe::dedupe;
use crate::error::SentimentError;
use crate::sources::{FetchRequest, FinnhubSource, FmpSource, NewsApiSource, RssSource};
use crate::types::Headline;

const NEWSAPI_MAX: usize = 100;
const FMP_MAX: usize = 150;
const FINNHUB_PER_TICKER: usize = 10;

/// Concatenate source batches, dedupe, order newest first, and cap at `limit`.
///
/// Ties in publish time keep their concatenation order.
#[must_use]
pub fn merge_headlines<I>(batches: I, limit: usize) -> Vec<Headline>
where
    I: IntoIterator<Item = Vec<Headline>>,
{
    let merged: Vec<Headline> = batches.into_iter().flatten().collect();
    let mut items = dedupe(merged);
    items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    items.truncate(limit);
    items
}

/// Owns the four headline sources and calls them in a fixed order.
#[derive(Debug, Clone)]
pub struct Aggregator {
    rss: RssSource,
    newsapi: NewsApiSource,
    fmp: FmpSource,
    finnhub: FinnhubSource,
    since_hours: u32,
    limit: usize,
}

impl Aggregator {
    /// Build an aggregator from explicit sources, with window and limit
    /// defaults taken from [`NewsConfig::default`].
    #[must_use]
    pub fn new(
        rss: RssSource,
        newsapi: NewsApiSource,
        fmp: FmpSource,
        finnhub: FinnhubSource,
    ) -> Self {
        let defaults = NewsConfig::default();
        Self {
            rss,
            newsapi,
            fmp,
            finnhub,
            since_hours: defaults.since_hours,
            limit: defaults.limit,
        }
    }

    /// Build an aggregator with one shared HTTP client and every setting from
    /// `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn from_config(config: &NewsConfig) -> Result<Self, SentimentError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self::new(
            RssSource::from_config(client.clone(), config),
            NewsApiSource::new(client.clone(), config.newsapi_key.clone()),
            FmpSource::new(client.clone(), config.fmp_api_key.clone()),
            FinnhubSource::new(client, config.finnhub_api_key.clone()),
        )
        .with_defaults(config.since_hours, config.limit))
    }

    /// Window and limit used when a call does not pass its own.
    #[must_use]
    pub fn with_defaults(mut self, since_hours: u32, limit: usize) -> Self {
        self.since_hours = since_hours;
        self.limit = limit;
        self
    }

    /// Fetch from RSS, `NewsAPI`, FMP and Finnhub in that order, then
    /// [`merge_headlines`].
    ///
    /// Sources are awaited one after another. A failing or unconfigured
    /// source contributes nothing; the result is always a (possibly empty)
    /// list of at most `limit` headlines.
    pub async fn fetch_all_headlines(
        &self,
        tickers: &[String],
        since_hours: Option<u32>,
        limit: Option<usize>,
    ) -> Vec<Headline> {
        let since_hours = since_hours.unwrap_or(self.since_hours);
        let limit = limit.unwrap_or(self.limit);

        let request = |limit| FetchRequest {
            tickers,
            since_hours,
            limit,
        };

        let batches = vec![
            settle("rss", self.rss.fetch(&request(limit)).await),
            settle(
                "newsapi",
                self.newsapi.fetch(&request(limit.min(NEWSAPI_MAX))).await,
            ),
            settle("fmp", self.fmp.fetch(&request(limit.min(FMP_MAX))).await),
            settle(
                "finnhub",
                self.finnhub.fetch(&request(FINNHUB_PER_TICKER)).await,
            ),
        ];

        let collected: usize = batches.iter().map(Vec::len).sum();
        let headlines = merge_headlines(batches, limit);
        tracing::info!(
            collected,
            returned = headlines.len(),
            since_hours,
            limit,
            "aggregated headlines"
        );
        headlines
    }
}

/// Turn one source's result into a batch, logging and discarding any error.
fn settle(source: &'static str, result: Result<Vec<Headline>, SentimentError>) -> Vec<Headline> {
    match result {
        Ok(items) => {
            tracing::debug!(source, count = items.len(), "collected headlines");
            items
        }
        Err(SentimentError::MissingCredential(var)) => {
            tracing::debug!(source, var, "source disabled, credential not set");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(source, error = %e, "headline source failed");
            Vec::new()
        }
    }
}

/// Build an [`Aggregator`] from `config` and run one aggregation.
///
/// If the HTTP client cannot be built the failure is logged and an empty
/// list is returned.
pub async fn fetch_all_headlines(
    config: &NewsConfig,
    tickers: &[String],
    since_hours: Option<u32>,
    limit: Option<usize>,
) -> Vec<Headline> {
    match Aggregator::from_config(config) {
        Ok(aggregator) => {
            aggregator
                .fetch_all_headlines(tickers, since_hours, limit)
                .await
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not build HTTP client for headline sources");
            Vec::new()
        }
    }
}
