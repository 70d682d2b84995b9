use std::fmt::Write as _;
use std::sync::{Mutex, PoisonError};
use tickview_core::chart::ChartModel;
use tickview_core::ui::{ResultPanel, StatusLine, ViewSink, PLACEHOLDER};

/// Prints status lines as they happen and keeps the latest chart and panel for the
/// final report.
#[derive(Debug, Default)]
pub struct TerminalView {
    chart: Mutex<ChartModel>,
    panel: Mutex<Option<ResultPanel>>,
}

impl TerminalView {
    pub fn report(&self) -> String {
        let chart = self.chart.lock().unwrap_or_else(PoisonError::into_inner);
        let panel = self.panel.lock().unwrap_or_else(PoisonError::into_inner);

        let mut out = String::new();
        if !chart.is_empty() {
            out.push_str(&chart_table(&chart));
        }
        if let Some(panel) = panel.as_ref() {
            out.push('\n');
            out.push_str(&panel_text(panel));
        }
        out
    }
}

impl ViewSink for TerminalView {
    fn on_status(&self, status: &StatusLine) {
        if status.text.is_empty() {
            return;
        }
        if status.is_error {
            eprintln!("{}", status.text);
        } else {
            println!("{}", status.text);
        }
    }

    fn on_chart(&self, chart: &ChartModel) {
        *self.chart.lock().unwrap_or_else(PoisonError::into_inner) = chart.clone();
    }

    fn on_panel(&self, panel: Option<&ResultPanel>) {
        *self.panel.lock().unwrap_or_else(PoisonError::into_inner) = panel.cloned();
    }
}

fn cell(v: Option<f64>) -> String {
    match v {
        Some(p) if p.is_finite() => format!("{p:.2}"),
        _ => String::new(),
    }
}

pub fn chart_table(chart: &ChartModel) -> String {
    let mut out = format!("{:<12} {:>12} {:>12}\n", "date", "historical", "forecast");
    let labels = chart.label_strings();
    for ((date, h), f) in labels.iter().zip(chart.historical()).zip(chart.forecast()) {
        let _ = writeln!(out, "{:<12} {:>12} {:>12}", date, cell(*h), cell(*f));
    }
    out
}

pub fn panel_text(panel: &ResultPanel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", panel.stock_name, panel.recommendation);
    let _ = writeln!(out, "change:     {}", panel.price_change);
    let _ = writeln!(out, "confidence: {}", panel.confidence);
    let _ = writeln!(out, "ticker:     {}", panel.working_ticker);
    for (i, p) in panel.predictions.iter().enumerate() {
        let _ = writeln!(out, "day {}:      {}", i + 1, p);
    }
    out
}

pub fn suggestions_text(matches: &[&str]) -> String {
    if matches.is_empty() {
        return format!("{PLACEHOLDER}\n");
    }
    let mut out = matches.join("\n");
    out.push('\n');
    out
}
