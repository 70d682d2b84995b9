pub mod align;

use chrono::NaiveDate;
use serde::Serialize;

/// Render-ready chart data: one label axis and two parallel nullable series.
///
/// `labels`, `historical` and `forecast` always have the same length. `None` renders as a
/// gap, never as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartModel {
    labels: Vec<NaiveDate>,
    historical: Vec<Option<f64>>,
    forecast: Vec<Option<f64>>,

    // Number of leading labels that came from the history endpoint.
    #[serde(skip)]
    history_len: usize,
}

impl ChartModel {
    pub fn labels(&self) -> &[NaiveDate] {
        &self.labels
    }

    pub fn historical(&self) -> &[Option<f64>] {
        &self.historical
    }

    pub fn forecast(&self) -> &[Option<f64>] {
        &self.forecast
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history_len
    }

    pub fn forecast_len(&self) -> usize {
        self.labels.len().saturating_sub(self.history_len)
    }

    pub fn last_history_date(&self) -> Option<NaiveDate> {
        let end = self.history_len.min(self.labels.len());
        self.labels[..end].last().copied()
    }

    pub fn label_strings(&self) -> Vec<String> {
        self.labels
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect()
    }
}
