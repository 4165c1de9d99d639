//! Headline source adapters.
//!
//! Each adapter normalizes one provider's records into [`Headline`]s and
//! reports failures as [`crate::SentimentError`]. Deciding what a failure
//! means for the run is left to [`crate::aggregator`].

mod finnhub;
mod fmp;
mod newsapi;
mod rss;
mod rss_helpers;

pub use finnhub::FinnhubSource;
pub use fmp::FmpSource;
pub use newsapi::NewsApiSource;
pub use rss::RssSource;

use chrono::{DateTime, TimeDelta, Utc};

use crate::dedupe::dedupe;
use crate::types::Headline;

/// Parameters shared by every adapter's `fetch`.
#[derive(Debug, Clone, Copy)]
pub struct FetchRequest<'a> {
    /// Tickers of interest. Ignored by sources that are not ticker-aware.
    pub tickers: &'a [String],
    /// Only headlines newer than this many hours are kept.
    pub since_hours: u32,
    /// Result cap. For [`FinnhubSource`] this is the cap per ticker.
    pub limit: usize,
}

impl FetchRequest<'_> {
    /// Oldest publish time still inside the aggregation window.
    ///
    /// A window reaching past the representable date range means no cutoff.
    #[must_use]
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        TimeDelta::try_hours(i64::from(self.since_hours))
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Newest first, then dedupe, then cap.
pub(crate) fn sort_dedupe_truncate(mut items: Vec<Headline>, limit: Option<usize>) -> Vec<Headline> {
    items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    let mut items = dedupe(items);
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}
