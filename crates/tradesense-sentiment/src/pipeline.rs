//! News sentiment pipeline orchestration.

use tradesense_core::NewsConfig;

use crate::aggregator::fetch_all_headlines;
use crate::matcher::match_headlines;
use crate::scorer::{aggregate, aggregate_per_ticker, score_headlines};
use crate::types::{Headline, NewsSentimentReport};

/// Run the full pipeline for a ticker universe.
///
/// 1. Fetch and merge headlines from every configured source.
/// 2. Score each headline with the keyword lexicon.
/// 3. Aggregate all scored headlines into the market aggregate.
/// 4. Bucket scored headlines per ticker and aggregate each bucket.
///
/// Never fails: zero headlines yield zeroed aggregates.
pub async fn run_news_sentiment(config: &NewsConfig, tickers: &[String]) -> NewsSentimentReport {
    let headlines = fetch_all_headlines(config, tickers, None, None).await;
    if headlines.is_empty() {
        tracing::info!(
            tickers = tickers.len(),
            "no headlines collected, returning neutral aggregates"
        );
    }
    analyze_headlines(&headlines, tickers)
}

/// Score, match and aggregate an already-fetched headline list.
#[must_use]
pub fn analyze_headlines(headlines: &[Headline], tickers: &[String]) -> NewsSentimentReport {
    let scored = score_headlines(headlines);
    let market = aggregate(&scored);
    let per_ticker = aggregate_per_ticker(match_headlines(&scored, tickers));

    tracing::info!(
        headlines = scored.len(),
        market_avg = market.avg,
        market_label = %market.label(),
        "scored headline sentiment"
    );

    NewsSentimentReport {
        headlines: scored,
        market,
        per_ticker,
    }
}
