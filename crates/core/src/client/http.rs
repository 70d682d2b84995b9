use crate::client::error::LookupError;
use crate::client::MarketApi;
use crate::config::Settings;
use crate::domain::contract::{ErrorBody, HistoryResponse, PredictResponse};
use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

const HISTORY_PATH: &str = "/history";
const PREDICT_PATH: &str = "/predict";

#[derive(Debug, Clone)]
pub struct HttpMarketApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpMarketApi {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings.require_base_url()?;
        Self::new(base_url, Duration::from_secs(settings.timeout_secs))
    }

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build market api http client")?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, symbol: &str) -> Result<T, LookupError> {
        let url = self.url(path);

        let res = self
            .http
            .get(&url)
            .query(&[("symbol", symbol)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(%url, %symbol, error = %e, "market api request failed");
                LookupError::transport(e)
            })?;

        let status = res.status();
        let text = res.text().await.map_err(|e| {
            tracing::error!(%url, %symbol, error = %e, "failed to read market api response");
            LookupError::transport(e)
        })?;

        let decoded = decode_response::<T>(status, &text);
        match &decoded {
            Err(LookupError::Http { message, .. }) => {
                tracing::warn!(%url, %symbol, %status, %message, "market api returned an error");
            }
            Err(err) => {
                tracing::error!(%url, %symbol, error = %err, body = %text, "market api response did not match contract");
            }
            Ok(_) => {}
        }
        decoded
    }
}

/// Non-2xx becomes `Http`; a success body that fails to decode becomes `Transport`.
fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, LookupError> {
    if !status.is_success() {
        return Err(LookupError::Http {
            status: status.as_u16(),
            message: error_message(status, body),
        });
    }

    serde_json::from_str::<T>(body).map_err(LookupError::transport)
}

#[async_trait::async_trait]
impl MarketApi for HttpMarketApi {
    async fn history(&self, symbol: &str) -> Result<HistoryResponse, LookupError> {
        self.get_json(HISTORY_PATH, symbol).await
    }

    async fn predict(&self, symbol: &str) -> Result<PredictResponse, LookupError> {
        self.get_json(PREDICT_PATH, symbol).await
    }
}

/// Server `{error}` message, else the status reason phrase.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|s| !s.trim().is_empty())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_server_body() {
        let msg = error_message(StatusCode::NOT_FOUND, r#"{"error":"No history found for XYZ"}"#);
        assert_eq!(msg, "No history found for XYZ");
    }

    #[test]
    fn error_message_falls_back_to_reason_phrase() {
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
            "Internal Server Error"
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, r#"{"error":""}"#), "Bad Gateway");
    }

    #[test]
    fn error_message_without_reason_uses_code() {
        let status = StatusCode::from_u16(599).unwrap();
        assert_eq!(error_message(status, ""), "HTTP 599");
    }

    #[test]
    fn non_success_status_is_http_error_with_server_message() {
        let res = decode_response::<HistoryResponse>(
            StatusCode::NOT_FOUND,
            r#"{"error":"No history found for XYZ"}"#,
        );
        assert_eq!(
            res.unwrap_err(),
            LookupError::Http {
                status: 404,
                message: "No history found for XYZ".to_string(),
            }
        );
    }

    #[test]
    fn non_success_status_wins_over_valid_looking_body() {
        let res = decode_response::<HistoryResponse>(StatusCode::BAD_REQUEST, r#"{"dates":[]}"#);
        assert!(matches!(
            res,
            Err(LookupError::Http { status: 400, ref message }) if message == "Bad Request"
        ));
    }

    #[test]
    fn undecodable_success_body_is_transport_error() {
        let res = decode_response::<PredictResponse>(StatusCode::OK, "<html>gateway</html>");
        assert!(matches!(res, Err(LookupError::Transport { .. })));

        let res = decode_response::<HistoryResponse>(StatusCode::OK, r#"{"dates":["14/11/2024"]}"#);
        assert!(matches!(res, Err(LookupError::Transport { .. })));
    }

    #[test]
    fn success_body_decodes_into_contract() {
        let body = r#"{"symbol":"TCS","predicted_prices":[1.5,"2.5"],"pct_change_%":-1.2}"#;
        let resp = decode_response::<PredictResponse>(StatusCode::OK, body).unwrap();
        assert_eq!(resp.predicted_prices, vec![1.5, 2.5]);
        assert_eq!(resp.pct_change, Some(-1.2));
    }

    #[test]
    fn url_joins_without_double_slash() {
        let api = HttpMarketApi::new("http://127.0.0.1:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.url(HISTORY_PATH), "http://127.0.0.1:5000/history");
        assert_eq!(api.url(PREDICT_PATH), "http://127.0.0.1:5000/predict");
    }
}
