//! Finnhub company-news collector. Queries one ticker at a time.

use std::time::Duration;

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;
use serde::Deserialize;

use super::{sort_dedupe_truncate, FetchRequest};
use crate::error::SentimentError;
use crate::types::Headline;

pub const DEFAULT_ENDPOINT: &str = "https://finnhub.io/api/v1/company-news";

/// Tickers queried per run; bounds the request count.
const MAX_TICKERS: usize = 60;
const TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct FinnhubArticle {
    headline: Option<String>,
    summary: Option<String>,
    url: Option<String>,
    source: Option<String>,
    /// Epoch seconds.
    datetime: Option<i64>,
}

/// Per-ticker company news from Finnhub. Disabled without `FINNHUB_API_KEY`.
#[derive(Debug, Clone)]
pub struct FinnhubSource {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl FinnhubSource {
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

    /// Fetch the newest `request.limit` headlines for each of the first 60
    /// tickers, dated from the start of the window to today (UTC).
    ///
    /// A ticker whose request fails is logged and skipped. With no tickers
    /// nothing is requested.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::MissingCredential`] when no API key is
    /// configured; no request is made.
    pub async fn fetch(&self, request: &FetchRequest<'_>) -> Result<Vec<Headline>, SentimentError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(SentimentError::MissingCredential("FINNHUB_API_KEY"));
        };

        let now = Utc::now();
        let from = request.cutoff(now).date_naive().format("%Y-%m-%d").to_string();
        let to = now.date_naive().format("%Y-%m-%d").to_string();
        let mut items = Vec::new();

        for ticker in request.tickers.iter().take(MAX_TICKERS) {
            match self.fetch_ticker(ticker, &from, &to, api_key).await {
                Ok(mut articles) => {
                    articles.sort_by_key(|a| std::cmp::Reverse(a.datetime.unwrap_or(0)));
                    let before = items.len();
                    items.extend(
                        articles
                            .into_iter()
                            .take(request.limit)
                            .map(|a| to_headline(a, now)),
                    );
                    tracing::debug!(
                        ticker = %ticker,
                        count = items.len() - before,
                        "fetched Finnhub company news"
                    );
                }
                Err(e) => {
                    tracing::warn!(ticker = %ticker, error = %e, "Finnhub company news failed");
                }
            }
        }

        Ok(sort_dedupe_truncate(items, None))
    }

    async fn fetch_ticker(
        &self,
        ticker: &str,
        from: &str,
        to: &str,
        api_key: &str,
    ) -> Result<Vec<FinnhubArticle>, SentimentError> {
        let url = format!(
            "{}?symbol={}&from={from}&to={to}&token={}",
            self.endpoint,
            utf8_percent_encode(ticker, NON_ALPHANUMERIC),
            utf8_percent_encode(api_key, NON_ALPHANUMERIC),
        );
        let articles = self
            .client
            .get(&url)
            .timeout(TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(articles)
    }
}

fn to_headline(article: FinnhubArticle, now: DateTime<Utc>) -> Headline {
    let published_at = article
        .datetime
        .filter(|&ts| ts != 0)
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .unwrap_or(now);
    Headline::new(
        article.headline.as_deref().unwrap_or_default(),
        article.summary.as_deref().unwrap_or_default(),
        article.url.as_deref().unwrap_or_default(),
        article.source.as_deref().unwrap_or("Finnhub"),
        published_at,
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn epoch_seconds_become_utc() {
        let article: FinnhubArticle = serde_json::from_value(serde_json::json!({
            "headline": "Nvidia climbs",
            "datetime": 1_740_996_000
        }))
        .unwrap();
        let h = to_headline(article, Utc::now());
        assert_eq!(
            h.published_at,
            Utc.with_ymd_and_hms(2025, 3, 3, 10, 0, 0).unwrap()
        );
        assert_eq!(h.source, "Finnhub");
    }

    #[test]
    fn zero_or_missing_datetime_defaults_to_now() {
        let now = Utc.with_ymd_and_hms(2025, 3, 3, 12, 0, 0).unwrap();
        let zero: FinnhubArticle =
            serde_json::from_value(serde_json::json!({ "datetime": 0 })).unwrap();
        let missing: FinnhubArticle = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(to_headline(zero, now).published_at, now);
        assert_eq!(to_headline(missing, now).published_at, now);
    }
}
