/// Most suggestions returned for one query.
pub const MAX_SUGGESTIONS: usize = 10;

const DEFAULT_TICKERS: &[&str] = &[
    "ADANIENT", "ADANIPORTS", "APOLLOHOSP", "ASIANPAINT", "AXISBANK", "BAJAJ-AUTO",
    "BAJFINANCE", "BAJAJFINSV", "BHARTIARTL", "BPCL", "BRITANNIA", "CIPLA", "COALINDIA",
    "DIVISLAB", "DRREDDY", "EICHERMOT", "GRASIM", "HCLTECH", "HDFCBANK", "HDFCLIFE",
    "HEROMOTOCO", "HINDALCO", "HINDUNILVR", "ICICIBANK", "INDUSINDBK", "INFY", "ITC",
    "JSWSTEEL", "KOTAKBANK", "LT", "LTIM", "M&M", "MARUTI", "NESTLEIND", "NTPC", "ONGC",
    "POWERGRID", "RELIANCE", "SBILIFE", "SBIN", "SUNPHARMA", "TATACONSUM", "TATAMOTORS",
    "TATASTEEL", "TCS", "TECHM", "TITAN", "ULTRACEMCO", "UPL", "WIPRO",
];

/// Prefix lookup over a fixed ticker list.
#[derive(Debug, Clone)]
pub struct Suggester {
    tickers: Vec<String>,
}

impl Default for Suggester {
    fn default() -> Self {
        Self::new(DEFAULT_TICKERS.iter().copied())
    }
}

impl Suggester {
    pub fn new<I, S>(tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tickers: tickers.into_iter().map(|t| t.into().to_uppercase()).collect(),
        }
    }

    /// Tickers starting with the uppercased query, in list order.
    pub fn matches(&self, query: &str) -> Vec<&str> {
        if query.is_empty() {
            return Vec::new();
        }
        let prefix = query.to_uppercase();
        self.tickers
            .iter()
            .filter(|t| t.starts_with(&prefix))
            .take(MAX_SUGGESTIONS)
            .map(String::as_str)
            .collect()
    }
}
