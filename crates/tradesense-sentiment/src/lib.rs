//! Headline aggregation and sentiment scoring for `TradeSense`.
//!
//! Pulls market headlines from RSS feeds and the optional `NewsAPI`, FMP and
//! Finnhub APIs, merges and deduplicates them, scores each headline with a
//! keyword lexicon, and buckets the scored headlines per ticker. Produces a
//! market-wide aggregate plus one aggregate per requested ticker.

pub mod aggregator;
pub mod dedupe;
pub mod error;
pub mod matcher;
pub mod pipeline;
pub mod scorer;
pub mod sources;
pub mod types;

pub use aggregator::{fetch_all_headlines, merge_headlines, Aggregator};
pub use dedupe::dedupe;
pub use error::SentimentError;
pub use matcher::{headline_matches, match_headlines};
pub use pipeline::{analyze_headlines, run_news_sentiment};
pub use scorer::{aggregate, aggregate_per_ticker, score_headline, score_headlines, score_text};
pub use types::{
    Headline, NewsSentimentReport, ScoredHeadline, SentimentAggregate, SentimentLabel,
    TextSentiment, TickerSentimentBucket,
};
