//! Plain-text rendering for the CLI.

use tradesense_sentiment::{Headline, NewsSentimentReport, SentimentAggregate};

pub(crate) fn print_headlines(headlines: &[Headline]) {
    if headlines.is_empty() {
        println!("no headlines in window");
        return;
    }
    for h in headlines {
        println!(
            "{}  [{}]  {}",
            h.published_at.format("%Y-%m-%d %H:%M"),
            h.source,
            h.title
        );
    }
    println!("{} headlines", headlines.len());
}

pub(crate) fn aggregate_line(name: &str, agg: &SentimentAggregate) -> String {
    format!(
        "{name:<8} {label:<8} avg={avg:+.3} n={n} pos={pos} neg={neg} neu={neu}",
        label = agg.label(),
        avg = agg.avg,
        n = agg.n,
        pos = agg.pos,
        neg = agg.neg,
        neu = agg.neu,
    )
}

pub(crate) fn print_sentiment(report: &NewsSentimentReport) {
    println!("{}", aggregate_line("MARKET", &report.market));
    for (ticker, bucket) in &report.per_ticker {
        println!("{}", aggregate_line(ticker, &bucket.aggregate));
    }
}
