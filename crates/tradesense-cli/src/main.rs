mod report;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

const DEFAULT_TICKERS: &[&str] = &["AAPL", "MSFT", "NVDA"];

#[derive(Debug, Parser)]
#[command(name = "tradesense-cli")]
#[command(about = "TradeSense news aggregation and sentiment")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch, merge and list recent headlines from every configured source
    Headlines(RunArgs),
    /// Score headlines and print market and per-ticker sentiment
    Sentiment(RunArgs),
}

#[derive(Debug, Args, PartialEq, Eq)]
struct RunArgs {
    /// Comma-separated ticker symbols (defaults to AAPL,MSFT,NVDA)
    #[arg(long, value_delimiter = ',')]
    tickers: Vec<String>,

    /// Override NEWS_SINCE_HOURS for this run
    #[arg(long)]
    since_hours: Option<u32>,

    /// Override NEWS_LIMIT for this run
    #[arg(long)]
    limit: Option<usize>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl RunArgs {
    fn tickers(&self) -> Vec<String> {
        let given: Vec<String> = self
            .tickers
            .iter()
            .map(|t| t.trim().to_uppercase())
            .filter(|t| !t.is_empty())
            .collect();
        if given.is_empty() {
            DEFAULT_TICKERS.iter().map(|t| (*t).to_string()).collect()
        } else {
            given
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = tradesense_core::load_news_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Headlines(args)) => {
            let tickers = args.tickers();
            let headlines = tradesense_sentiment::fetch_all_headlines(
                &config,
                &tickers,
                args.since_hours,
                args.limit,
            )
            .await;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&headlines)?);
            } else {
                report::print_headlines(&headlines);
            }
        }
        Some(Commands::Sentiment(args)) => {
            let tickers = args.tickers();
            if let Some(since_hours) = args.since_hours {
                config.since_hours = since_hours;
            }
            if let Some(limit) = args.limit {
                config.limit = limit;
            }
            tracing::debug!(?config, "running news sentiment");
            let report = tradesense_sentiment::run_news_sentiment(&config, &tickers).await;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                report::print_sentiment(&report);
            }
        }
        None => println!("tradesense-cli: run `headlines` or `sentiment` (see --help)"),
    }

    Ok(())
}
