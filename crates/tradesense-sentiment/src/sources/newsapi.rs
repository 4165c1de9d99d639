//! `NewsAPI` top-headlines collector.

use std::time::Duration;

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;
use serde::Deserialize;

use super::{sort_dedupe_truncate, FetchRequest};
use crate::error::SentimentError;
use crate::types::Headline;

pub const DEFAULT_ENDPOINT: &str = "https://newsapi.org/v2/top-headlines";

const QUERY: &str = "stocks OR market OR earnings";
const LANGUAGE: &str = "en";
const MAX_PAGE_SIZE: usize = 100;
const TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    published_at: Option<String>,
    source: Option<NewsApiArticleSource>,
}

#[derive(Debug, Deserialize)]
struct NewsApiArticleSource {
    name: Option<String>,
}

/// Market-wide headlines from `NewsAPI`. Disabled without `NEWSAPI_KEY`.
#[derive(Debug, Clone)]
pub struct NewsApiSource {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl NewsApiSource {
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

    /// Fetch up to `request.limit` (max 100) headlines inside the window.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::MissingCredential`] when no API key is configured;
    ///   no request is made.
    /// - [`SentimentError::Http`] on network failure, non-2xx status, or an
    ///   undecodable body.
    pub async fn fetch(&self, request: &FetchRequest<'_>) -> Result<Vec<Headline>, SentimentError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(SentimentError::MissingCredential("NEWSAPI_KEY"));
        };

        let page_size = request.limit.min(MAX_PAGE_SIZE);
        let url = format!(
            "{}?apiKey={}&language={LANGUAGE}&pageSize={page_size}&q={}",
            self.endpoint,
            utf8_percent_encode(api_key, NON_ALPHANUMERIC),
            utf8_percent_encode(QUERY, NON_ALPHANUMERIC),
        );

        let response: NewsApiResponse = self
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
        let items = response
            .articles
            .into_iter()
            .map(|a| to_headline(a, now))
            .filter(|h| h.published_at >= cutoff)
            .collect();

        Ok(sort_dedupe_truncate(items, Some(request.limit)))
    }
}

fn to_headline(article: NewsApiArticle, now: DateTime<Utc>) -> Headline {
    let published_at = article
        .published_at
        .as_deref()
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
        .map_or(now, |dt| dt.with_timezone(&Utc));
    let source = article
        .source
        .and_then(|s| s.name)
        .unwrap_or_else(|| "NewsAPI".to_string());
    Headline::new(
        article.title.as_deref().unwrap_or_default(),
        article.description.as_deref().unwrap_or_default(),
        article.url.as_deref().unwrap_or_default(),
        &source,
        published_at,
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn missing_fields_default_to_empty() {
        let article: NewsApiArticle = serde_json::from_str("{}").unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 3, 12, 0, 0).unwrap();
        let h = to_headline(article, now);
        assert_eq!(h.title, "");
        assert_eq!(h.summary, "");
        assert_eq!(h.link, "");
        assert_eq!(h.source, "NewsAPI");
        assert_eq!(h.published_at, now);
    }

    #[test]
    fn parses_zulu_timestamp_and_source_name() {
        let article: NewsApiArticle = serde_json::from_value(serde_json::json!({
            "title": " Stocks rally ",
            "description": null,
            "url": "https://example.com/a",
            "publishedAt": "2025-03-03T10:30:00Z",
            "source": { "id": null, "name": "Reuters" }
        }))
        .unwrap();
        let h = to_headline(article, Utc::now());
        assert_eq!(h.title, "Stocks rally");
        assert_eq!(h.source, "Reuters");
        assert_eq!(
            h.published_at,
            Utc.with_ymd_and_hms(2025, 3, 3, 10, 30, 0).unwrap()
        );
    }

    #[test]
    fn unparseable_timestamp_defaults_to_now() {
        let article: NewsApiArticle =
            serde_json::from_value(serde_json::json!({ "publishedAt": "yesterday" })).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 3, 12, 0, 0).unwrap();
        assert_eq!(to_headline(article, now).published_at, now);
    }
}
