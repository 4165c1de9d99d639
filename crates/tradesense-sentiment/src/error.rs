use thiserror::Error;

/// Failure of a single headline source.
///
/// Never escapes the aggregator: every variant degrades to "no headlines from
/// this source" for the run.
#[derive(Debug, Error)]
pub enum SentimentError {
    /// Transport failure, non-2xx status, or an undecodable JSON body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The body was not a parseable RSS or Atom document.
    #[error("feed parse error: {0}")]
    Feed(#[from] feed_rs::parser::ParseFeedError),

    /// The provider needs an API key and the named env var is not set.
    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),
}
