/// Known ticker symbols and the company names headlines use for them.
pub const COMPANY_NAMES: &[(&str, &str)] = &[
    ("AAPL", "Apple"),
    ("MSFT", "Microsoft"),
    ("GOOG", "Google"),
    ("AMZN", "Amazon"),
    ("TSLA", "Tesla"),
    ("NFLX", "Netflix"),
    ("NVDA", "Nvidia"),
    ("META", "Meta"),
    ("JPM", "JPMorgan"),
    ("V", "Visa"),
];

/// Look up the company name for a ticker symbol (case-insensitive).
#[must_use]
pub fn company_name(symbol: &str) -> Option<&'static str> {
    let symbol = symbol.trim();
    COMPANY_NAMES
        .iter()
        .find(|(s, _)| s.eq_ignore_ascii_case(symbol))
        .map(|&(_, name)| name)
}
