pub mod error;
pub mod http;

use crate::client::error::LookupError;
use crate::domain::contract::{HistoryResponse, PredictResponse};

/// The `/history` and `/predict` backend.
#[async_trait::async_trait]
pub trait MarketApi: Send + Sync {
    async fn history(&self, symbol: &str) -> Result<HistoryResponse, LookupError>;

    async fn predict(&self, symbol: &str) -> Result<PredictResponse, LookupError>;
}
