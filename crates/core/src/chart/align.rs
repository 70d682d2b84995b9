use crate::chart::ChartModel;
use crate::time::calendar;
use chrono::NaiveDate;

/// Builds a chart from a historical series and a forecast series.
///
/// Forecast points are dated by stepping calendar days past the last historical date, or
/// past `today` when there is no history. The result always has
/// `dates.len() + forecast_prices.len()` slots.
pub fn align(
    dates: &[NaiveDate],
    historical_prices: &[f64],
    forecast_prices: &[f64],
    today: NaiveDate,
) -> ChartModel {
    let mut model = history_only(dates, historical_prices);
    overlay_forecast(&mut model, forecast_prices, today);
    model
}

/// Chart with only historical points; the forecast series is all gaps.
pub fn history_only(dates: &[NaiveDate], historical_prices: &[f64]) -> ChartModel {
    if historical_prices.len() != dates.len() {
        tracing::debug!(
            dates = dates.len(),
            prices = historical_prices.len(),
            "historical series length differs from date axis"
        );
    }

    let historical = (0..dates.len())
        .map(|i| historical_prices.get(i).copied())
        .collect();

    ChartModel {
        labels: dates.to_vec(),
        historical,
        forecast: vec![None; dates.len()],
        history_len: dates.len(),
    }
}

/// Extends `model` with forecast points after its historical tail.
///
/// Re-applying replaces any previous overlay instead of stacking on it, so a history-only
/// render followed by an overlay equals a single `align` call.
pub fn overlay_forecast(model: &mut ChartModel, forecast_prices: &[f64], today: NaiveDate) {
    let history_len = model.history_len;
    model.labels.truncate(history_len);
    model.historical.truncate(history_len);

    let last = model.last_history_date().unwrap_or(today);
    let forecast_dates = calendar::next_dates(forecast_prices.len(), last);
    let forecast_prices = &forecast_prices[..forecast_dates.len()];

    model.labels.extend(forecast_dates);
    model.historical.resize(model.labels.len(), None);

    let existing = std::mem::take(&mut model.forecast);
    model.forecast = reconcile_forecast(existing, model.labels.len(), forecast_prices);
}

// Fits `existing` to `total_len` slots (left-pad with gaps, or keep the last `total_len`),
// then writes the forecast into the tail and clears everything before it.
fn reconcile_forecast(
    existing: Vec<Option<f64>>,
    total_len: usize,
    forecast_prices: &[f64],
) -> Vec<Option<f64>> {
    let mut out = if existing.len() < total_len {
        let mut padded = vec![None; total_len - existing.len()];
        padded.extend(existing);
        padded
    } else {
        existing[existing.len() - total_len..].to_vec()
    };

    let head = total_len - forecast_prices.len();
    out[..head].fill(None);
    for (slot, price) in out[head..].iter_mut().zip(forecast_prices) {
        *slot = Some(*price);
    }
    out
}
