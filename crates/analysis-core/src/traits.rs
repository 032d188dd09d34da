use async_trait::async_trait;
use crate::{AnalysisError, PriceBar};

/// Provider of daily OHLCV history for a symbol
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Bars for roughly the last `lookback_days` calendar days, oldest first.
    /// May return fewer than the analysis needs; callers enforce the floor.
    async fn fetch_daily(&self, symbol: &str, lookback_days: u32) -> Result<Vec<PriceBar>, AnalysisError>;
}

/// External interpreter (a language model) that explains a validated summary
#[async_trait]
pub trait Interpreter: Send + Sync {
    async fn interpret(&self, system_prompt: &str, payload: &str) -> Result<String, AnalysisError>;
}
