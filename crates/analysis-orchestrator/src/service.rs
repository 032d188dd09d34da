use std::time::Duration;

use analysis_core::{AnalysisError, Interpreter, MarketDataSource, PriceSeries};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::interpretation::{InterpretationReport, SYSTEM_PROMPT};
use crate::pipeline::{analyze_market, MarketBrief};

/// Brief plus the interpreter's parsed explanation of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOutlook {
    pub brief: MarketBrief,
    pub interpretation: InterpretationReport,
}

/// Fetch, analyze, interpret. Holds collaborators and settings only.
pub struct MarketBriefService<S, I> {
    source: S,
    interpreter: I,
    config: AnalysisConfig,
    fetch_timeout: Duration,
    interpret_timeout: Duration,
}

impl<S, I> MarketBriefService<S, I> {
    pub fn new(source: S, interpreter: I, config: AnalysisConfig) -> Self {
        Self {
            fetch_timeout: config.fetch_timeout(),
            interpret_timeout: config.interpret_timeout(),
            source,
            interpreter,
            config,
        }
    }

    /// Override the collaborator deadlines taken from the config
    pub fn with_timeouts(mut self, fetch: Duration, interpret: Duration) -> Self {
        self.fetch_timeout = fetch;
        self.interpret_timeout = interpret;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }
}

impl<S, I> MarketBriefService<S, I>
where
    S: MarketDataSource,
{
    /// Fetch and run the deterministic pipeline without calling the interpreter
    pub async fn brief(&self, symbol: &str) -> Result<MarketBrief, AnalysisError> {
        let fetch = self.source.fetch_daily(symbol, self.config.lookback_days);
        let bars = timeout(self.fetch_timeout, fetch)
            .await
            .map_err(|_| {
                AnalysisError::Timeout(format!(
                    "market data for {symbol} not received within {:?}",
                    self.fetch_timeout
                ))
            })??;

        debug!(symbol, bars = bars.len(), "Fetched daily bars");

        let series = PriceSeries::daily(bars)?;
        series.require(self.config.min_daily_bars)?;
        analyze_market(&series, symbol, &self.config)
    }
}

impl<S, I> MarketBriefService<S, I>
where
    S: MarketDataSource,
    I: Interpreter,
{
    /// Brief the symbol, then hand the payload to the interpreter
    pub async fn analyze(&self, symbol: &str) -> Result<MarketOutlook, AnalysisError> {
        let brief = self.brief(symbol).await?;
        let payload = brief.payload().to_json()?;

        let reply = timeout(
            self.interpret_timeout,
            self.interpreter.interpret(SYSTEM_PROMPT, &payload),
        )
        .await
        .map_err(|_| {
            AnalysisError::Timeout(format!(
                "interpretation for {symbol} not received within {:?}",
                self.interpret_timeout
            ))
        })??;

        if reply.trim().is_empty() {
            return Err(AnalysisError::ApiError(
                "interpreter returned an empty response".to_string(),
            ));
        }

        let interpretation = InterpretationReport::parse(&reply);
        info!(
            symbol,
            bias = %interpretation.directional_bias,
            confidence = %interpretation.confidence_level,
            "Interpretation received"
        );

        Ok(MarketOutlook {
            brief,
            interpretation,
        })
    }
}
