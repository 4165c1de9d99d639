//! Integration tests for the headline source adapters.
//!
//! Each test stands up a local `wiremock` server and points one adapter at
//! it, so no real provider is contacted.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tradesense_sentiment::sources::{
    FetchRequest, FinnhubSource, FmpSource, NewsApiSource, RssSource,
};
use tradesense_sentiment::SentimentError;

fn hours_ago(h: i64) -> DateTime<Utc> {
    Utc::now() - TimeDelta::hours(h)
}

fn tickers(symbols: &[&str]) -> Vec<String> {
    symbols.iter().map(|s| (*s).to_string()).collect()
}

fn rss_body(title: &str, items: &[(&str, &str, DateTime<Utc>)]) -> String {
    let mut xml = format!(r#"<?xml version="1.0"?><rss version="2.0"><channel><title>{title}</title>"#);
    for (item_title, link, published) in items {
        xml.push_str(&format!(
            "<item><title>{item_title}</title><link>{link}</link><description>Body of {item_title}</description><pubDate>{}</pubDate></item>",
            published.to_rfc2822()
        ));
    }
    xml.push_str("</channel></rss>");
    xml
}

// ---------------------------------------------------------------------------
// RSS
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rss_skips_failing_feed_and_keeps_the_rest() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/markets.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss_body(
            "Markets",
            &[
                ("Apple rallies", "https://e.com/1", hours_ago(2)),
                ("Banks slump", "https://e.com/2", hours_ago(1)),
            ],
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let source = RssSource::new(
        reqwest::Client::new(),
        vec![
            format!("{}/broken.xml", server.uri()),
            format!("{}/markets.xml", server.uri()),
        ],
    )
    .with_delay(Duration::ZERO);

    let items = source
        .fetch(&FetchRequest {
            tickers: &[],
            since_hours: 48,
            limit: 10,
        })
        .await
        .expect("rss fetch never fails");

    let titles: Vec<&str> = items.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["Banks slump", "Apple rallies"]);
    assert_eq!(items[0].source, "Markets");
    assert_eq!(items[0].summary, "Body of Banks slump");
}

#[tokio::test]
async fn rss_drops_entries_outside_window_and_applies_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss_body(
            "Feed",
            &[
                ("fresh 1", "https://e.com/1", hours_ago(1)),
                ("fresh 2", "https://e.com/2", hours_ago(2)),
                ("fresh 3", "https://e.com/3", hours_ago(3)),
                ("stale", "https://e.com/4", hours_ago(100)),
            ],
        )))
        .mount(&server)
        .await;

    let source = RssSource::new(reqwest::Client::new(), vec![format!("{}/feed", server.uri())])
        .with_delay(Duration::ZERO);

    let items = source
        .fetch(&FetchRequest {
            tickers: &[],
            since_hours: 48,
            limit: 2,
        })
        .await
        .unwrap();

    let titles: Vec<&str> = items.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["fresh 1", "fresh 2"]);
}

#[tokio::test]
async fn rss_with_no_feeds_returns_empty() {
    let source = RssSource::new(reqwest::Client::new(), Vec::new());
    let items = source
        .fetch(&FetchRequest {
            tickers: &[],
            since_hours: 48,
            limit: 10,
        })
        .await
        .unwrap();
    assert!(items.is_empty());
}

// ---------------------------------------------------------------------------
// NewsAPI
// ---------------------------------------------------------------------------

#[tokio::test]
async fn newsapi_without_key_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"articles": []})))
        .expect(0)
        .mount(&server)
        .await;

    let source = NewsApiSource::new(reqwest::Client::new(), None)
        .with_endpoint(&format!("{}/v2/top-headlines", server.uri()));
    let result = source
        .fetch(&FetchRequest {
            tickers: &[],
            since_hours: 48,
            limit: 100,
        })
        .await;

    assert!(matches!(
        result,
        Err(SentimentError::MissingCredential("NEWSAPI_KEY"))
    ));
}

#[tokio::test]
async fn newsapi_normalizes_and_filters_articles() {
    let server = MockServer::start().await;

    let body = json!({
        "status": "ok",
        "articles": [
            {
                "title": "Markets rally on jobs data",
                "description": "Stocks climb",
                "url": "https://e.com/jobs",
                "publishedAt": hours_ago(3).to_rfc3339(),
                "source": { "id": null, "name": "Reuters" }
            },
            {
                "title": "Old news",
                "url": "https://e.com/old",
                "publishedAt": hours_ago(200).to_rfc3339(),
                "source": { "name": "AP" }
            },
            {
                "title": "No source or date",
                "description": null,
                "url": null,
                "source": null
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .and(query_param("apiKey", "news-key"))
        .and(query_param("pageSize", "100"))
        .and(query_param("language", "en"))
        .and(query_param("q", "stocks OR market OR earnings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let source = NewsApiSource::new(reqwest::Client::new(), Some("news-key".to_string()))
        .with_endpoint(&format!("{}/v2/top-headlines", server.uri()));
    let items = source
        .fetch(&FetchRequest {
            tickers: &[],
            since_hours: 48,
            limit: 300,
        })
        .await
        .expect("should parse articles");

    assert_eq!(items.len(), 2);
    // undated article is stamped "now", so it sorts first
    assert_eq!(items[0].title, "No source or date");
    assert_eq!(items[0].source, "NewsAPI");
    assert_eq!(items[0].link, "");
    assert_eq!(items[1].title, "Markets rally on jobs data");
    assert_eq!(items[1].source, "Reuters");
    assert_eq!(items[1].summary, "Stocks climb");
}

#[tokio::test]
async fn newsapi_server_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let source = NewsApiSource::new(reqwest::Client::new(), Some("k".to_string()))
        .with_endpoint(&server.uri());
    let result = source
        .fetch(&FetchRequest {
            tickers: &[],
            since_hours: 48,
            limit: 10,
        })
        .await;

    assert!(matches!(result, Err(SentimentError::Http(_))));
}

// ---------------------------------------------------------------------------
// FMP
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fmp_sends_tickers_and_parses_naive_timestamps() {
    let server = MockServer::start().await;
    let fmt = "%Y-%m-%d %H:%M:%S";

    let body = json!([
        {
            "symbol": "AAPL",
            "title": "Apple beats estimates",
            "text": "Strong iPhone quarter",
            "url": "https://e.com/aapl",
            "site": "Barrons",
            "publishedDate": hours_ago(5).format(fmt).to_string()
        },
        {
            "symbol": "NVDA",
            "title": "Nvidia downgrade",
            "url": "https://e.com/nvda",
            "publishedDate": hours_ago(1).format(fmt).to_string()
        },
        {
            "symbol": "NVDA",
            "title": "Ancient history",
            "url": "https://e.com/old",
            "publishedDate": hours_ago(500).format(fmt).to_string()
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/v3/stock_news"))
        .and(query_param("apikey", "fmp-key"))
        .and(query_param("limit", "150"))
        .and(query_param("tickers", "AAPL,NVDA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let source = FmpSource::new(reqwest::Client::new(), Some("fmp-key".to_string()))
        .with_endpoint(&format!("{}/api/v3/stock_news", server.uri()));
    let symbols = tickers(&["AAPL", "NVDA"]);
    let items = source
        .fetch(&FetchRequest {
            tickers: &symbols,
            since_hours: 48,
            limit: 150,
        })
        .await
        .expect("should parse FMP news");

    let titles: Vec<&str> = items.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["Nvidia downgrade", "Apple beats estimates"]);
    assert_eq!(items[0].source, "FMP");
    assert_eq!(items[1].source, "Barrons");
}

#[tokio::test]
async fn fmp_error_object_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "Error Message": "Invalid API KEY." })),
        )
        .mount(&server)
        .await;

    let source =
        FmpSource::new(reqwest::Client::new(), Some("bad".to_string())).with_endpoint(&server.uri());
    let result = source
        .fetch(&FetchRequest {
            tickers: &[],
            since_hours: 48,
            limit: 10,
        })
        .await;

    assert!(matches!(result, Err(SentimentError::Http(_))));
}

#[tokio::test]
async fn fmp_sends_at_most_fifty_tickers() {
    let server = MockServer::start().await;
    let symbols: Vec<String> = (0..55).map(|i| format!("T{i}")).collect();
    let expected = symbols[..50].join(",");

    Mock::given(method("GET"))
        .and(path("/api/v3/stock_news"))
        .and(query_param("tickers", expected.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let source = FmpSource::new(reqwest::Client::new(), Some("fmp-key".to_string()))
        .with_endpoint(&format!("{}/api/v3/stock_news", server.uri()));
    let items = source
        .fetch(&FetchRequest {
            tickers: &symbols,
            since_hours: 48,
            limit: 150,
        })
        .await
        .expect("first fifty tickers should be sent");
    assert!(items.is_empty());
}

// ---------------------------------------------------------------------------
// Finnhub
// ---------------------------------------------------------------------------

fn finnhub_article(headline: &str, url: &str, at: DateTime<Utc>) -> serde_json::Value {
    json!({
        "category": "company",
        "datetime": at.timestamp(),
        "headline": headline,
        "id": 1,
        "related": "",
        "source": "Yahoo",
        "summary": "",
        "url": url
    })
}

#[tokio::test]
async fn finnhub_caps_per_ticker_and_skips_failed_tickers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/company-news"))
        .and(query_param("symbol", "AAPL"))
        .and(query_param("token", "fh-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            finnhub_article("Apple old", "https://e.com/a3", hours_ago(30)),
            finnhub_article("Apple newest", "https://e.com/a1", hours_ago(1)),
            finnhub_article("Apple middle", "https://e.com/a2", hours_ago(10)),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/company-news"))
        .and(query_param("symbol", "TSLA"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/company-news"))
        .and(query_param("symbol", "NVDA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            finnhub_article("Nvidia news", "https://e.com/n1", hours_ago(5)),
        ])))
        .mount(&server)
        .await;

    let source = FinnhubSource::new(reqwest::Client::new(), Some("fh-key".to_string()))
        .with_endpoint(&format!("{}/company-news", server.uri()));
    let symbols = tickers(&["AAPL", "TSLA", "NVDA"]);
    let items = source
        .fetch(&FetchRequest {
            tickers: &symbols,
            since_hours: 48,
            limit: 2,
        })
        .await
        .expect("finnhub skips failed tickers");

    let titles: Vec<&str> = items.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["Apple newest", "Nvidia news", "Apple middle"]);
    assert!(items.iter().all(|h| h.source == "Yahoo"));
}

#[tokio::test]
async fn finnhub_without_tickers_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let source = FinnhubSource::new(reqwest::Client::new(), Some("fh-key".to_string()))
        .with_endpoint(&server.uri());
    let items = source
        .fetch(&FetchRequest {
            tickers: &[],
            since_hours: 48,
            limit: 10,
        })
        .await
        .unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn finnhub_queries_at_most_sixty_tickers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/company-news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(60)
        .mount(&server)
        .await;

    let source = FinnhubSource::new(reqwest::Client::new(), Some("fh-key".to_string()))
        .with_endpoint(&format!("{}/company-news", server.uri()));
    let symbols: Vec<String> = (0..65).map(|i| format!("T{i}")).collect();
    let items = source
        .fetch(&FetchRequest {
            tickers: &symbols,
            since_hours: 48,
            limit: 10,
        })
        .await
        .unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn unset_keys_fail_fast_under_concurrent_calls() {
    let client = reqwest::Client::new();
    let symbols = tickers(&["AAPL"]);
    let request = FetchRequest {
        tickers: &symbols,
        since_hours: 48,
        limit: 10,
    };
    let newsapi = NewsApiSource::new(client.clone(), None);
    let fmp = FmpSource::new(client.clone(), None);
    let finnhub = FinnhubSource::new(client, None);

    let all = async {
        tokio::join!(
            newsapi.fetch(&request),
            newsapi.fetch(&request),
            fmp.fetch(&request),
            fmp.fetch(&request),
            finnhub.fetch(&request),
            finnhub.fetch(&request),
        )
    };
    let (a, b, c, d, e, f) = tokio::time::timeout(Duration::from_secs(1), all)
        .await
        .expect("credential check must not touch the network");

    for result in [a, b, c, d, e, f] {
        assert!(matches!(result, Err(SentimentError::MissingCredential(_))));
    }
}
