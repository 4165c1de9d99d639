//! Keyword lexicon scorer for market headlines.

use std::collections::BTreeMap;

use crate::types::{
    Headline, ScoredHeadline, SentimentAggregate, SentimentLabel, TextSentiment,
    TickerSentimentBucket,
};

pub(crate) const POSITIVE_KEYWORDS: &[&str] = &[
    "bullish",
    "surge",
    "rally",
    "gain",
    "profit",
    "growth",
    "strong",
    "upgrade",
    "beat",
    "outperform",
    "positive",
    "rise",
    "climb",
    "jump",
    "soar",
    "boom",
    "success",
    "exceed",
    "boost",
    "impressive",
];

pub(crate) const NEGATIVE_KEYWORDS: &[&str] = &[
    "bearish",
    "fall",
    "drop",
    "loss",
    "decline",
    "weak",
    "downgrade",
    "miss",
    "underperform",
    "negative",
    "plunge",
    "crash",
    "slump",
    "tumble",
    "sink",
    "concern",
    "worry",
    "risk",
    "fail",
    "disappoint",
];

/// Per-item label cutoff.
const ITEM_THRESHOLD: f64 = 0.2;
/// Aggregate label cutoff. Looser than [`ITEM_THRESHOLD`].
const AGGREGATE_THRESHOLD: f64 = 0.1;

/// Confidence reported for text containing no keywords at all.
const NO_SIGNAL_CONFIDENCE: f64 = 0.5;

fn label_for(score: f64, threshold: f64) -> SentimentLabel {
    if score > threshold {
        SentimentLabel::Positive
    } else if score < -threshold {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Score a text by counting lexicon keywords it contains.
///
/// Matching is substring containment on the lowercased text, so "gains"
/// counts for "gain" and "uprise" counts for "rise". Each keyword counts at
/// most once. The score is `(pos - neg) / (pos + neg)`; text with no keywords
/// scores `0.0` with confidence `0.5`.
#[must_use]
pub fn score_text(text: &str) -> TextSentiment {
    let lowered = text.to_lowercase();
    let positive_count = POSITIVE_KEYWORDS
        .iter()
        .filter(|k| lowered.contains(*k))
        .count();
    let negative_count = NEGATIVE_KEYWORDS
        .iter()
        .filter(|k| lowered.contains(*k))
        .count();

    let total = positive_count + negative_count;
    if total == 0 {
        return TextSentiment {
            score: 0.0,
            label: SentimentLabel::Neutral,
            confidence: NO_SIGNAL_CONFIDENCE,
            positive_count,
            negative_count,
        };
    }

    #[allow(clippy::cast_precision_loss)]
    let score = (positive_count as f64 - negative_count as f64) / total as f64;
    TextSentiment {
        score,
        label: label_for(score, ITEM_THRESHOLD),
        confidence: score.abs(),
        positive_count,
        negative_count,
    }
}

/// Score a headline's title and summary independently and average them.
///
/// An empty summary is skipped; a headline with no text at all scores like
/// the empty string.
#[must_use]
pub fn score_headline(headline: &Headline) -> ScoredHeadline {
    let parts: Vec<TextSentiment> = [headline.title.as_str(), headline.summary.as_str()]
        .into_iter()
        .filter(|t| !t.trim().is_empty())
        .map(score_text)
        .collect();

    let (score, confidence) = if parts.is_empty() {
        let empty = score_text("");
        (empty.score, empty.confidence)
    } else {
        #[allow(clippy::cast_precision_loss)]
        let denom = parts.len() as f64;
        (
            parts.iter().map(|p| p.score).sum::<f64>() / denom,
            parts.iter().map(|p| p.confidence).sum::<f64>() / denom,
        )
    };

    ScoredHeadline {
        headline: headline.clone(),
        score,
        label: label_for(score, ITEM_THRESHOLD),
        confidence,
    }
}

/// Score every headline, preserving order.
#[must_use]
pub fn score_headlines(headlines: &[Headline]) -> Vec<ScoredHeadline> {
    headlines.iter().map(score_headline).collect()
}

/// Aggregate scored headlines into mean score and label counts.
///
/// Counts come from each item's own label; see [`SentimentAggregate::label`]
/// for the aggregate's label.
#[must_use]
pub fn aggregate(scored: &[ScoredHeadline]) -> SentimentAggregate {
    if scored.is_empty() {
        return SentimentAggregate::default();
    }

    let mut agg = SentimentAggregate {
        n: scored.len(),
        ..SentimentAggregate::default()
    };
    for item in scored {
        match item.label {
            SentimentLabel::Positive => agg.pos += 1,
            SentimentLabel::Negative => agg.neg += 1,
            SentimentLabel::Neutral => agg.neu += 1,
        }
    }
    #[allow(clippy::cast_precision_loss)]
    let denom = scored.len() as f64;
    agg.avg = scored.iter().map(|s| s.score).sum::<f64>() / denom;
    agg
}

/// Aggregate each ticker's matched headlines.
#[must_use]
pub fn aggregate_per_ticker(
    matched: BTreeMap<String, Vec<ScoredHeadline>>,
) -> BTreeMap<String, TickerSentimentBucket> {
    matched
        .into_iter()
        .map(|(ticker, headlines)| {
            let aggregate = aggregate(&headlines);
            let bucket = TickerSentimentBucket {
                ticker: ticker.clone(),
                headlines,
                aggregate,
            };
            (ticker, bucket)
        })
        .collect()
}

impl SentimentAggregate {
    /// Overall label: positive above `0.1`, negative below `-0.1`.
    #[must_use]
    pub fn label(&self) -> SentimentLabel {
        label_for(self.avg, AGGREGATE_THRESHOLD)
    }
}
