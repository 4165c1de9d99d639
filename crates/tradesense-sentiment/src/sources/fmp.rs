//! Financial Modeling Prep stock-news collector.

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;
use serde::Deserialize;

use super::{sort_dedupe_truncate, FetchRequest};
use crate::error::SentimentError;
use crate::types::Headline;

pub const DEFAULT_ENDPOINT: &str = "https://financialmodelingprep.com/api/v3/stock_news";

const MAX_LIMIT: usize = 250;
const MAX_TICKERS: usize = 50;
const TIMEOUT: Duration = Duration::from_secs(12);
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FmpArticle {
    title: Option<String>,
    text: Option<String>,
    url: Option<String>,
    site: Option<String>,
    published_date: Option<String>,
}

/// Stock news from FMP, biased to the requested tickers. Disabled without
/// `FMP_API_KEY`.
#[derive(Debug, Clone)]
pub struct FmpSource {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl FmpSource {
    #[must_use]
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Point the source at a different URL (used by tests).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Fetch up to `request.limit` headlines inside the window.
    ///
    /// The first 50 tickers are sent as a filter; with no tickers FMP returns
    /// general stock news.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::MissingCredential`] when no API key is configured;
    ///   no request is made.
    /// - [`SentimentError::Http`] on network failure, non-2xx status, or an
    ///   undecodable body.
    pub async fn fetch(&self, request: &FetchRequest<'_>) -> Result<Vec<Headline>, SentimentError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(SentimentError::MissingCredential("FMP_API_KEY"));
        };

        let mut url = format!(
            "{}?limit={}&apikey={}",
            self.endpoint,
            request.limit.min(MAX_LIMIT),
            utf8_percent_encode(api_key, NON_ALPHANUMERIC),
        );
        if !request.tickers.is_empty() {
            let joined = request
                .tickers
                .iter()
                .take(MAX_TICKERS)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(",");
            url.push_str("&tickers=");
            url.push_str(&utf8_percent_encode(&joined, NON_ALPHANUMERIC).to_string());
        }

        let articles: Vec<FmpArticle> = self
            .client
            .get(&url)
            .timeout(TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let now = Utc::now();
        let cutoff = request.cutoff(now);
        let items = articles
            .into_iter()
            .map(|a| to_headline(a, now))
            .filter(|h| h.published_at >= cutoff)
            .collect();

        Ok(sort_dedupe_truncate(items, Some(request.limit)))
    }
}

/// FMP timestamps carry no zone; they are read as UTC.
fn parse_published(ts: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(ts.trim(), TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

fn to_headline(article: FmpArticle, now: DateTime<Utc>) -> Headline {
    let published_at = article
        .published_date
        .as_deref()
        .and_then(parse_published)
        .unwrap_or(now);
    Headline::new(
        article.title.as_deref().unwrap_or_default(),
        article.text.as_deref().unwrap_or_default(),
        article.url.as_deref().unwrap_or_default(),
        article.site.as_deref().unwrap_or("FMP"),
        published_at,
    )
}
