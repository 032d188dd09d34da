use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::AnalysisError;

/// OHLCV bar for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    /// Check the OHLC envelope and volume sign. Returns a description of the
    /// first violated invariant.
    pub fn check(&self) -> Result<(), String> {
        let values = [self.open, self.high, self.low, self.close, self.volume];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(format!("{}: non-finite value", self.date));
        }
        if self.high < self.open.max(self.close).max(self.low) {
            return Err(format!(
                "{}: high {:.2} below open/close/low (O={:.2} L={:.2} C={:.2})",
                self.date, self.high, self.open, self.low, self.close
            ));
        }
        if self.low > self.open.min(self.close).min(self.high) {
            return Err(format!(
                "{}: low {:.2} above open/close/high (O={:.2} H={:.2} C={:.2})",
                self.date, self.low, self.open, self.high, self.close
            ));
        }
        if self.volume < 0.0 {
            return Err(format!("{}: negative volume {}", self.date, self.volume));
        }
        Ok(())
    }
}

/// Bar granularity. Weekly series are always derived from daily ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
}

impl Granularity {
    pub fn name(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
        }
    }
}

/// Validated, date-ordered sequence of bars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    granularity: Granularity,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a daily series, rejecting malformed bars and out-of-order or
    /// duplicate dates.
    pub fn daily(bars: Vec<PriceBar>) -> Result<Self, AnalysisError> {
        Self::validated(Granularity::Daily, bars)
    }

    /// Build a weekly series from already-aggregated bars.
    pub fn weekly(bars: Vec<PriceBar>) -> Result<Self, AnalysisError> {
        Self::validated(Granularity::Weekly, bars)
    }

    fn validated(granularity: Granularity, bars: Vec<PriceBar>) -> Result<Self, AnalysisError> {
        for (i, bar) in bars.iter().enumerate() {
            bar.check()
                .map_err(|msg| AnalysisError::InvalidData(format!("bar {i}: {msg}")))?;
            if i > 0 && bars[i - 1].date >= bar.date {
                return Err(AnalysisError::InvalidData(format!(
                    "bar {i}: date {} does not follow {}",
                    bar.date,
                    bars[i - 1].date
                )));
            }
        }
        Ok(Self { granularity, bars })
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Fail with `InsufficientData` when the series is shorter than `required`.
    pub fn require(&self, required: usize) -> Result<(), AnalysisError> {
        if self.bars.len() < required {
            return Err(AnalysisError::InsufficientData {
                required,
                actual: self.bars.len(),
            });
        }
        Ok(())
    }
}
