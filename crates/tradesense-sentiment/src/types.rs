use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One news item normalized from a provider-specific format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headline {
    pub title: String,
    /// May be empty when the provider sends no description.
    pub summary: String,
    /// May be empty when the provider sends no URL.
    pub link: String,
    /// Provider or feed name.
    pub source: String,
    /// Defaults to fetch time when the provider omits it.
    pub published_at: DateTime<Utc>,
}

impl Headline {
    /// Build a headline, trimming surrounding whitespace from title and summary.
    #[must_use]
    pub fn new(
        title: &str,
        summary: &str,
        link: &str,
        source: &str,
        published_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.trim().to_string(),
            summary: summary.trim().to_string(),
            link: link.to_string(),
            source: source.to_string(),
            published_at,
        }
    }

    /// Title and summary joined by a space; the text tickers are matched against.
    #[must_use]
    pub fn text(&self) -> String {
        if self.summary.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, self.summary)
        }
    }
}

/// Polarity label for a scored text or an aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        })
    }
}

/// Keyword score for a single piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextSentiment {
    /// In `[-1.0, 1.0]`.
    pub score: f64,
    pub label: SentimentLabel,
    pub confidence: f64,
    pub positive_count: usize,
    pub negative_count: usize,
}

/// A [`Headline`] with its sentiment attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredHeadline {
    #[serde(flatten)]
    pub headline: Headline,
    pub score: f64,
    pub label: SentimentLabel,
    pub confidence: f64,
}

/// Summary over a set of scored headlines.
///
/// The empty aggregate is all zeros, never NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SentimentAggregate {
    pub avg: f64,
    pub n: usize,
    pub pos: usize,
    pub neg: usize,
    pub neu: usize,
}

/// Headlines matched to one ticker plus their aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerSentimentBucket {
    pub ticker: String,
    pub headlines: Vec<ScoredHeadline>,
    pub aggregate: SentimentAggregate,
}

/// Output of one pipeline run, consumed by the downstream scoring step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsSentimentReport {
    /// Scored headlines, newest first.
    pub headlines: Vec<ScoredHeadline>,
    /// Aggregate over every headline regardless of ticker.
    pub market: SentimentAggregate,
    /// One bucket per requested ticker, keyed by the ticker as requested.
    pub per_ticker: BTreeMap<String, TickerSentimentBucket>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_title_and_summary() {
        let h = Headline::new("  Title \n", "\tsummary ", "https://x", "feed", Utc::now());
        assert_eq!(h.title, "Title");
        assert_eq!(h.summary, "summary");
    }

    #[test]
    fn text_omits_empty_summary() {
        let h = Headline::new("Only title", "", "", "feed", Utc::now());
        assert_eq!(h.text(), "Only title");
    }

    #[test]
    fn label_serializes_lowercase() {
        let json = serde_json::to_string(&SentimentLabel::Negative).unwrap();
        assert_eq!(json, "\"negative\"");
    }

    #[test]
    fn default_aggregate_is_all_zero() {
        let agg = SentimentAggregate::default();
        assert_eq!(agg.avg, 0.0);
        assert_eq!((agg.n, agg.pos, agg.neg, agg.neu), (0, 0, 0, 0));
    }
}
