/// Finance feeds polled when `RSS_FEEDS` is unset or blank.
pub const DEFAULT_RSS_FEEDS: &[&str] = &[
    "https://www.cnbc.com/id/100003114/device/rss/rss.html",
    "https://feeds.a.dj.com/rss/RSSMarketsMain.xml",
    "https://www.marketwatch.com/feeds/topstories",
    "https://finance.yahoo.com/news/rssindex",
    "https://www.investopedia.com/feedbuilder/feed/getfeed?feedName=news",
    "https://www.ft.com/?format=rss",
    "https://www.reuters.com/markets/rss",
];

/// Runtime settings for headline aggregation.
///
/// Loaded once at startup and passed around by reference; nothing mutates it
/// after construction.
#[derive(Clone, PartialEq, Eq)]
pub struct NewsConfig {
    /// Recency cutoff, in hours, applied by every adapter.
    pub since_hours: u32,
    /// Maximum number of headlines returned by the aggregator.
    pub limit: usize,
    pub rss_feeds: Vec<String>,
    pub newsapi_key: Option<String>,
    pub fmp_api_key: Option<String>,
    pub finnhub_api_key: Option<String>,
    pub log_level: String,
    pub user_agent: String,
    pub rss_feed_delay_ms: u64,
    pub rss_timeout_secs: u64,
}

impl std::fmt::Debug for NewsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsConfig")
            .field("since_hours", &self.since_hours)
            .field("limit", &self.limit)
            .field("rss_feeds", &self.rss_feeds)
            .field(
                "newsapi_key",
                &self.newsapi_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "fmp_api_key",
                &self.fmp_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "finnhub_api_key",
                &self.finnhub_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("user_agent", &self.user_agent)
            .field("rss_feed_delay_ms", &self.rss_feed_delay_ms)
            .field("rss_timeout_secs", &self.rss_timeout_secs)
            .finish()
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            since_hours: 48,
            limit: 300,
            rss_feeds: DEFAULT_RSS_FEEDS.iter().map(|s| (*s).to_string()).collect(),
            newsapi_key: None,
            fmp_api_key: None,
            finnhub_api_key: None,
            log_level: "info".to_string(),
            user_agent: "tradesense/0.1 (news-aggregation)".to_string(),
            rss_feed_delay_ms: 150,
            rss_timeout_secs: 10,
        }
    }
}
