//! Shared configuration and reference data for the `TradeSense` news pipeline.

mod app_config;
mod config;
mod tickers;

use thiserror::Error;

pub use app_config::{NewsConfig, DEFAULT_RSS_FEEDS};
pub use config::{load_news_config, load_news_config_from_env};
pub use tickers::{company_name, COMPANY_NAMES};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
