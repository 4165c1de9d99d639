//! Shared RSS/Atom parsing and HTML stripping helpers.

use chrono::{DateTime, Utc};

use crate::error::SentimentError;
use crate::types::Headline;

/// Entries read from a single feed before the recency filter is applied.
pub(crate) const MAX_ENTRIES_PER_FEED: usize = 100;

/// Parse an RSS or Atom body into [`Headline`]s published at or after `cutoff`.
///
/// The source name is the feed's own title, falling back to `feed_url`.
/// Entries without a publish time fall back to their updated time, then to
/// `now`. Only the first [`MAX_ENTRIES_PER_FEED`] entries are considered.
///
/// # Errors
///
/// Returns [`SentimentError::Feed`] if the body is not a recognizable feed.
pub(crate) fn parse_feed(
    body: &[u8],
    feed_url: &str,
    cutoff: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<Vec<Headline>, SentimentError> {
    let feed = feed_rs::parser::parse(body)?;

    let source = feed
        .title
        .map(|t| t.content.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| feed_url.to_string());

    let headlines = feed
        .entries
        .into_iter()
        .take(MAX_ENTRIES_PER_FEED)
        .filter_map(|entry| {
            let published_at = entry.published.or(entry.updated).unwrap_or(now);
            if published_at < cutoff {
                return None;
            }
            let title = entry.title.map(|t| t.content).unwrap_or_default();
            let summary = entry
                .summary
                .map(|s| strip_html(&s.content))
                .unwrap_or_default();
            let link = entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_default();
            Some(Headline::new(&title, &summary, &link, &source, published_at))
        })
        .collect();

    Ok(headlines)
}

/// Strip HTML tags from a string and normalize whitespace.
///
/// `<` only opens a tag when followed by a letter, `/` or `!`; otherwise it is
/// kept as text.
pub(crate) fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut chars = html.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '<' if !in_tag
                && chars
                    .peek()
                    .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!')) =>
            {
                in_tag = true;
            }
            '>' if in_tag => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
