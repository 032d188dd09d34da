use anyhow::{ensure, Context, Result};
use multi_timeframe::DEFAULT_BARS_PER_WEEK;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use technical_analysis::MIN_DAILY_BARS;

use crate::data_quality::DEFAULT_MAX_GAP_DAYS;
use crate::validation::DEFAULT_MAX_UNKNOWN_FRACTION;

/// Pipeline and service settings.
///
/// The daily floor and the gate threshold can only be made stricter than
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    // Pipeline
    pub min_daily_bars: usize,
    pub bars_per_week: usize,
    pub max_unknown_fraction: f64,
    pub max_gap_days: i64,

    // Service
    pub lookback_days: u32,
    pub fetch_timeout_secs: u64,
    pub interpret_timeout_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_daily_bars: MIN_DAILY_BARS,
            bars_per_week: DEFAULT_BARS_PER_WEEK,
            max_unknown_fraction: DEFAULT_MAX_UNKNOWN_FRACTION,
            max_gap_days: DEFAULT_MAX_GAP_DAYS,
            lookback_days: 180,
            fetch_timeout_secs: 15,
            interpret_timeout_secs: 60,
        }
    }
}

impl AnalysisConfig {
    /// Reads `BRIEF_*` overrides from the environment, falling back to defaults.
    /// Callers load `.env` first.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            min_daily_bars: env_or("BRIEF_MIN_DAILY_BARS", defaults.min_daily_bars)?,
            bars_per_week: env_or("BRIEF_BARS_PER_WEEK", defaults.bars_per_week)?,
            max_unknown_fraction: env_or(
                "BRIEF_MAX_UNKNOWN_FRACTION",
                defaults.max_unknown_fraction,
            )?,
            max_gap_days: env_or("BRIEF_MAX_GAP_DAYS", defaults.max_gap_days)?,
            lookback_days: env_or("BRIEF_LOOKBACK_DAYS", defaults.lookback_days)?,
            fetch_timeout_secs: env_or("BRIEF_FETCH_TIMEOUT_SECS", defaults.fetch_timeout_secs)?,
            interpret_timeout_secs: env_or(
                "BRIEF_INTERPRET_TIMEOUT_SECS",
                defaults.interpret_timeout_secs,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.min_daily_bars >= MIN_DAILY_BARS,
            "min_daily_bars must be at least {MIN_DAILY_BARS}, got {}",
            self.min_daily_bars
        );
        ensure!(self.bars_per_week >= 1, "bars_per_week must be at least 1");
        ensure!(
            self.max_unknown_fraction > 0.0
                && self.max_unknown_fraction <= DEFAULT_MAX_UNKNOWN_FRACTION,
            "max_unknown_fraction must be in (0, {DEFAULT_MAX_UNKNOWN_FRACTION}], got {}",
            self.max_unknown_fraction
        );
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn interpret_timeout(&self) -> Duration {
        Duration::from_secs(self.interpret_timeout_secs)
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}
