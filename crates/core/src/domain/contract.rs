use crate::domain::series::{HistorySeries, PredictionResult, FORECAST_HORIZON};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// `GET /history` success body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub working_ticker: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dates: Vec<NaiveDate>,
    #[serde(default, deserialize_with = "number_like_seq")]
    pub prices: Vec<f64>,
}

/// `GET /predict` success body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(rename = "pct_change_%", default)]
    pub pct_change: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub working_ticker: Option<String>,
    #[serde(default, deserialize_with = "number_like_seq")]
    pub predicted_prices: Vec<f64>,
}

/// Non-2xx body shared by both endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}

impl HistoryResponse {
    pub fn into_series(self) -> HistorySeries {
        let mut dates = self.dates;
        let mut prices = self.prices;
        if dates.len() != prices.len() {
            tracing::warn!(
                dates = dates.len(),
                prices = prices.len(),
                "history dates/prices length mismatch; truncating to shorter"
            );
            let n = dates.len().min(prices.len());
            dates.truncate(n);
            prices.truncate(n);
        }
        HistorySeries { dates, prices }
    }
}

impl PredictResponse {
    pub fn into_result(self, requested_symbol: &str) -> PredictionResult {
        let symbol = self
            .symbol
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| requested_symbol.to_uppercase());

        let mut predicted_prices = self.predicted_prices;
        if predicted_prices.len() > FORECAST_HORIZON {
            tracing::warn!(
                %symbol,
                got = predicted_prices.len(),
                max = FORECAST_HORIZON,
                "too many predicted prices; truncating"
            );
            predicted_prices.truncate(FORECAST_HORIZON);
        }

        PredictionResult {
            symbol,
            recommendation: non_empty(self.recommendation),
            pct_change: self.pct_change,
            confidence: self.confidence,
            working_ticker: non_empty(self.working_ticker),
            predicted_prices,
        }
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Numbers and numeric strings parse as-is; anything else becomes NaN.
pub fn number_like(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => f64::NAN,
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn number_like_seq<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default().iter().map(number_like).collect())
}
