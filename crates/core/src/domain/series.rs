use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Up to this many forecast points are accepted per prediction.
pub const FORECAST_HORIZON: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySeries {
    pub dates: Vec<NaiveDate>,
    pub prices: Vec<f64>,
}

impl HistorySeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub symbol: String,
    pub recommendation: Option<String>,
    pub pct_change: Option<f64>,
    pub confidence: Option<f64>,
    pub working_ticker: Option<String>,
    pub predicted_prices: Vec<f64>,
}
