//! Maps scored headlines onto the tickers they mention.

use std::collections::BTreeMap;

use tradesense_core::company_name;

use crate::types::{Headline, ScoredHeadline};

/// Whether `headline` mentions `ticker` by symbol or by known company name.
///
/// Comparison is a substring check on the uppercased title + summary. A
/// symbol missing from the company table only matches on the symbol itself.
/// Blank text and blank tickers never match.
#[must_use]
pub fn headline_matches(headline: &Headline, ticker: &str) -> bool {
    let text = headline.text();
    if text.trim().is_empty() {
        return false;
    }
    let symbol = ticker.trim();
    if symbol.is_empty() {
        return false;
    }
    text_mentions(&text.to_uppercase(), symbol)
}

fn text_mentions(upper_text: &str, symbol: &str) -> bool {
    if upper_text.contains(&symbol.to_uppercase()) {
        return true;
    }
    company_name(symbol).is_some_and(|name| upper_text.contains(&name.to_uppercase()))
}

/// Bucket scored headlines by ticker.
///
/// Every requested ticker gets an entry, empty when nothing matched. A
/// headline can land in several buckets; bucket order follows input order.
#[must_use]
pub fn match_headlines(
    scored: &[ScoredHeadline],
    tickers: &[String],
) -> BTreeMap<String, Vec<ScoredHeadline>> {
    let mut buckets: BTreeMap<String, Vec<ScoredHeadline>> = tickers
        .iter()
        .map(|t| (t.clone(), Vec::new()))
        .collect();

    for item in scored {
        let text = item.headline.text();
        if text.trim().is_empty() {
            continue;
        }
        let upper = text.to_uppercase();
        for (ticker, bucket) in &mut buckets {
            let symbol = ticker.trim();
            if !symbol.is_empty() && text_mentions(&upper, symbol) {
                bucket.push(item.clone());
            }
        }
    }

    tracing::debug!(
        headlines = scored.len(),
        tickers = tickers.len(),
        matched = buckets.values().map(Vec::len).sum::<usize>(),
        "matched headlines to tickers"
    );

    buckets
}
