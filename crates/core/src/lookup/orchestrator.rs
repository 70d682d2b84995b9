use crate::chart::{align, ChartModel};
use crate::client::error::LookupError;
use crate::client::MarketApi;
use crate::domain::contract::{HistoryResponse, PredictResponse};
use crate::domain::series::PredictionResult;
use crate::lookup::state::{Failure, RequestState, Stage};
use crate::time::calendar;
use crate::ui::{self, ViewSink};
use chrono::{NaiveDate, Utc};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Everything a lookup has produced so far. Replaced wholesale when a new lookup begins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Sequence number of the most recently issued lookup.
    pub seq: u64,
    pub symbol: Option<String>,
    pub state: RequestState,
    pub chart: ChartModel,
    pub result: Option<PredictionResult>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The symbol was rejected before any request was issued.
    Rejected(LookupError),
    /// The lookup ran to a terminal state and its effects were applied.
    Settled(RequestState),
    /// A newer lookup was issued while this one was in flight; its responses were dropped.
    Superseded,
}

/// Drives history-then-prediction lookups and owns the chart/result model.
///
/// Lookups may overlap. Each one is tagged with a sequence number and a response is
/// applied only while its number is still the latest issued.
pub struct FetchOrchestrator<A, V> {
    api: A,
    view: V,
    session: Mutex<Session>,
    today: fn() -> NaiveDate,
}

impl<A: MarketApi, V: ViewSink> FetchOrchestrator<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            session: Mutex::new(Session::default()),
            today: || calendar::today(Utc::now()),
        }
    }

    /// Overrides the date used to extend a forecast when history is empty.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn snapshot(&self) -> Session {
        self.lock().clone()
    }

    pub fn state(&self) -> RequestState {
        self.lock().state.clone()
    }

    pub async fn submit(&self, raw_symbol: &str) -> SubmitOutcome {
        let symbol = match normalize_symbol(raw_symbol) {
            Ok(s) => s,
            Err(err) => {
                tracing::debug!(input = %raw_symbol, "rejected empty symbol");
                self.view.on_status(&ui::validation_line(&err));
                return SubmitOutcome::Rejected(err);
            }
        };

        let seq = self.begin(&symbol);

        let history = self.api.history(&symbol).await;
        if let Some(outcome) = self.apply_history(seq, &symbol, history) {
            return outcome;
        }

        let prediction = self.api.predict(&symbol).await;
        self.apply_prediction(seq, &symbol, prediction)
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, symbol: &str) -> u64 {
        let mut session = self.lock();
        let seq = session.seq + 1;
        *session = Session {
            seq,
            symbol: Some(symbol.to_string()),
            state: RequestState::LoadingHistory,
            ..Session::default()
        };
        tracing::info!(%symbol, seq, "lookup started");

        self.view.on_chart(&session.chart);
        self.view.on_panel(None);
        self.view.on_status(&ui::status_line(&session.state));
        seq
    }

    // Some(outcome) when the lookup ends at the history stage.
    fn apply_history(
        &self,
        seq: u64,
        symbol: &str,
        res: Result<HistoryResponse, LookupError>,
    ) -> Option<SubmitOutcome> {
        let mut session = self.lock();
        if session.seq != seq {
            tracing::debug!(%symbol, seq, latest = session.seq, "discarding stale history response");
            return Some(SubmitOutcome::Superseded);
        }

        let resp = match res {
            Ok(resp) => resp,
            Err(error) => return Some(self.fail(&mut session, Stage::History, error)),
        };

        let reported_symbol = resp.symbol.clone();
        let working_ticker = resp.working_ticker.clone();
        let series = resp.into_series();
        session.chart = align::align(&series.dates, &series.prices, &[], (self.today)());
        session.state = RequestState::LoadingPrediction;
        tracing::info!(
            %symbol,
            seq,
            reported_symbol = reported_symbol.as_deref().unwrap_or(ui::PLACEHOLDER),
            working_ticker = working_ticker.as_deref().unwrap_or(ui::PLACEHOLDER),
            points = series.len(),
            last_date = ?series.last_date(),
            "history applied"
        );

        self.view.on_chart(&session.chart);
        self.view.on_status(&ui::status_line(&session.state));
        None
    }

    fn apply_prediction(
        &self,
        seq: u64,
        symbol: &str,
        res: Result<PredictResponse, LookupError>,
    ) -> SubmitOutcome {
        let mut session = self.lock();
        if session.seq != seq {
            tracing::debug!(%symbol, seq, latest = session.seq, "discarding stale prediction response");
            return SubmitOutcome::Superseded;
        }

        let result = match res {
            Ok(resp) => resp.into_result(symbol),
            Err(error) => return self.fail(&mut session, Stage::Prediction, error),
        };

        align::overlay_forecast(&mut session.chart, &result.predicted_prices, (self.today)());
        let panel = ui::result_panel(&result);
        tracing::info!(
            %symbol,
            seq,
            forecast = result.predicted_prices.len(),
            recommendation = result.recommendation.as_deref().unwrap_or(ui::PLACEHOLDER),
            "prediction applied"
        );
        session.result = Some(result);
        session.state = RequestState::Ready;

        self.view.on_chart(&session.chart);
        self.view
            .on_panel(ui::panel_visible(&session.state).then_some(&panel));
        self.view.on_status(&ui::status_line(&session.state));
        SubmitOutcome::Settled(session.state.clone())
    }

    fn fail(&self, session: &mut Session, stage: Stage, error: LookupError) -> SubmitOutcome {
        tracing::warn!(symbol = ?session.symbol, seq = session.seq, %stage, error = %error, "lookup failed");
        session.state = RequestState::Failed(Failure { stage, error });
        self.view.on_status(&ui::status_line(&session.state));
        SubmitOutcome::Settled(session.state.clone())
    }
}

/// Trims and uppercases user input; empty input is a validation error.
pub fn normalize_symbol(raw: &str) -> Result<String, LookupError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LookupError::Validation("Please enter a symbol".to_string()));
    }
    Ok(trimmed.to_uppercase())
}
