use crate::chart::ChartModel;
use crate::client::error::LookupError;
use crate::domain::series::{PredictionResult, FORECAST_HORIZON};
use crate::lookup::state::{Failure, RequestState, Stage};

pub const PLACEHOLDER: &str = "—";
pub const CURRENCY: &str = "₹";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

impl StatusLine {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Text fields of the result card, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPanel {
    pub stock_name: String,
    pub recommendation: String,
    pub price_change: String,
    pub confidence: String,
    pub working_ticker: String,
    pub predictions: [String; FORECAST_HORIZON],
}

/// Receives everything the page would draw. Implemented by the chart/panel front-end.
pub trait ViewSink: Send + Sync {
    fn on_status(&self, status: &StatusLine);

    fn on_chart(&self, chart: &ChartModel);

    /// `None` hides the result panel.
    fn on_panel(&self, panel: Option<&ResultPanel>);
}

pub fn status_line(state: &RequestState) -> StatusLine {
    match state {
        RequestState::Idle => StatusLine::info(""),
        RequestState::LoadingHistory => StatusLine::info("Loading history..."),
        RequestState::LoadingPrediction => {
            StatusLine::info("History loaded — now fetching prediction...")
        }
        RequestState::Ready => StatusLine::info("Prediction ready!"),
        RequestState::Failed(failure) => failure_line(failure),
    }
}

pub fn validation_line(err: &LookupError) -> StatusLine {
    StatusLine::error(err.user_message())
}

fn failure_line(failure: &Failure) -> StatusLine {
    let api = match failure.stage {
        Stage::History => "History",
        Stage::Prediction => "Predict",
    };
    match &failure.error {
        LookupError::Transport { .. } => StatusLine::error(format!("{api} fetch error (see logs)")),
        other => StatusLine::error(format!("{api} API Error: {}", other.user_message())),
    }
}

pub fn panel_visible(state: &RequestState) -> bool {
    matches!(state, RequestState::Ready)
}

pub fn result_panel(result: &PredictionResult) -> ResultPanel {
    let predictions = std::array::from_fn(|i| {
        result
            .predicted_prices
            .get(i)
            .copied()
            .filter(|p| p.is_finite())
            .map(|p| format!("{CURRENCY}{p:.2}"))
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    });

    ResultPanel {
        stock_name: result.symbol.clone(),
        recommendation: or_placeholder(result.recommendation.clone()),
        price_change: or_placeholder(result.pct_change.map(signed_percent)),
        confidence: or_placeholder(result.confidence.map(|c| format!("{c}%"))),
        working_ticker: or_placeholder(result.working_ticker.clone()),
        predictions,
    }
}

fn signed_percent(pct: f64) -> String {
    if pct > 0.0 {
        format!("+{pct}%")
    } else {
        format!("{pct}%")
    }
}

fn or_placeholder(v: Option<String>) -> String {
    v.unwrap_or_else(|| PLACEHOLDER.to_string())
}
