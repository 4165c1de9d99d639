use std::str::FromStr;

use crate::app_config::{NewsConfig, DEFAULT_RSS_FEEDS};
use crate::ConfigError;

/// Load news configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed.
pub fn load_news_config() -> Result<NewsConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_news_config_from_env()
}

/// Load news configuration from environment variables already in the process.
///
/// Unlike [`load_news_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed.
pub fn load_news_config_from_env() -> Result<NewsConfig, ConfigError> {
    build_news_config(|key| std::env::var(key))
}

/// Build news configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`.
fn build_news_config<F>(lookup: F) -> Result<NewsConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = NewsConfig::default();

    let non_blank = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        non_blank(var).unwrap_or_else(|| default.to_string())
    };

    let since_hours = parse_or(&non_blank, "NEWS_SINCE_HOURS", defaults.since_hours)?;
    let limit = parse_or(&non_blank, "NEWS_LIMIT", defaults.limit)?;
    let rss_feed_delay_ms = parse_or(
        &non_blank,
        "TRADESENSE_RSS_FEED_DELAY_MS",
        defaults.rss_feed_delay_ms,
    )?;
    let rss_timeout_secs = parse_or(
        &non_blank,
        "TRADESENSE_RSS_TIMEOUT_SECS",
        defaults.rss_timeout_secs,
    )?;

    let rss_feeds = non_blank("RSS_FEEDS").map_or_else(
        || DEFAULT_RSS_FEEDS.iter().map(|s| (*s).to_string()).collect(),
        |raw| split_list(&raw),
    );

    Ok(NewsConfig {
        since_hours,
        limit,
        rss_feeds,
        newsapi_key: non_blank("NEWSAPI_KEY"),
        fmp_api_key: non_blank("FMP_API_KEY"),
        finnhub_api_key: non_blank("FINNHUB_API_KEY"),
        log_level: or_default("TRADESENSE_LOG_LEVEL", &defaults.log_level),
        user_agent: or_default("TRADESENSE_USER_AGENT", &defaults.user_agent),
        rss_feed_delay_ms,
        rss_timeout_secs,
    })
}

fn parse_or<T, G>(get: &G, var: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(var) {
        None => Ok(default),
        Some(raw) => raw.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
