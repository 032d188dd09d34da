use analysis_core::{
    AnalysisError, Momentum, PriceSeries, RiskMode, SupportResistance, Trend, TrendDuration,
    TrendStrength, Volatility, VolumeBehavior,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::indicators::*;
use crate::signals::*;

/// Minimum daily history for a usable analysis
pub const MIN_DAILY_BARS: usize = 50;

/// Labeled signals for one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSet {
    pub overall_trend: Trend,
    pub trend_duration_days: usize,
    pub trend_duration: TrendDuration,
    pub volume_behavior: VolumeBehavior,
    #[serde(rename = "volatilityLevel")]
    pub volatility: Volatility,
    pub momentum: Momentum,
    pub trend_strength: TrendStrength,
    pub support_resistance: SupportResistance,
    pub risk_mode: RiskMode,
}

/// Numeric evidence behind an [`IndicatorSet`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawValues {
    /// Rounded to two decimals
    pub rsi: f64,
    pub days_in_trend: usize,
    pub current_price: f64,
    pub sma50: Option<f64>,
    pub sma200: Option<f64>,
    pub atr: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub indicators: IndicatorSet,
    pub raw: RawValues,
}

/// Computes an [`IndicatorSnapshot`] from a price series.
///
/// The engine only enforces its own `min_bars`; the daily 50-bar floor lives
/// in [`IndicatorEngine::daily`], while weekly series are accepted shorter.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorEngine {
    min_bars: usize,
}

impl IndicatorEngine {
    pub fn new(min_bars: usize) -> Self {
        Self {
            min_bars: min_bars.max(1),
        }
    }

    pub fn daily() -> Self {
        Self::new(MIN_DAILY_BARS)
    }

    pub fn weekly() -> Self {
        Self::new(1)
    }

    pub fn min_bars(&self) -> usize {
        self.min_bars
    }

    pub fn compute(&self, series: &PriceSeries) -> Result<IndicatorSnapshot, AnalysisError> {
        series.require(self.min_bars)?;

        let bars = series.bars();
        let closes = series.closes();
        let current_price = closes[closes.len() - 1];

        let reading = detect_trend(&closes);
        let rsi_value = rsi(&closes, RSI_PERIOD);
        let atr_values = atr(bars, ATR_PERIOD);

        let volatility = volatility_label(&atr_values, current_price);
        let momentum = momentum_label(rsi_value);
        let volume = volume_behavior(bars);
        let strength = trend_strength(&closes);
        let position = support_resistance(&closes);
        let risk = risk_mode(volatility, momentum, volume);

        let indicators = IndicatorSet {
            overall_trend: reading.trend,
            trend_duration_days: reading.days_in_trend,
            trend_duration: duration_label(reading.days_in_trend),
            volume_behavior: volume,
            volatility,
            momentum,
            trend_strength: strength,
            support_resistance: position,
            risk_mode: risk,
        };

        let raw = RawValues {
            rsi: round2(rsi_value),
            days_in_trend: reading.days_in_trend,
            current_price,
            sma50: latest(&sma(&closes, MEDIUM_MA)).map(round2),
            sma200: latest(&sma(&closes, LONG_MA)).map(round2),
            atr: latest(&atr_values).map(round2),
        };

        debug!(
            granularity = series.granularity().name(),
            bars = bars.len(),
            trend = %indicators.overall_trend,
            days_in_trend = reading.days_in_trend,
            momentum = %indicators.momentum,
            volatility = %indicators.volatility,
            "Computed indicators"
        );

        Ok(IndicatorSnapshot { indicators, raw })
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::daily()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::PriceBar;
    use chrono::{Duration, NaiveDate};

    fn series_from_closes(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let open = if i == 0 { close } else { closes[i - 1] };
                PriceBar {
                    date: start + Duration::days(i as i64),
                    open,
                    high: open.max(close) + 0.2,
                    low: open.min(close) - 0.2,
                    close,
                    volume: 1_000_000.0,
                }
            })
            .collect();
        PriceSeries::daily(bars).unwrap()
    }

    #[test]
    fn test_daily_engine_rejects_short_series() {
        let series = series_from_closes(&[100.0; 49]);
        let err = IndicatorEngine::daily().compute(&series).unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientData { required: 50, actual: 49 });
    }

    #[test]
    fn test_weekly_engine_accepts_short_series() {
        let series = series_from_closes(&[100.0, 101.0, 102.0]);
        let snapshot = IndicatorEngine::weekly().compute(&series).unwrap();
        assert_eq!(snapshot.indicators.overall_trend, Trend::Unknown);
        assert_eq!(snapshot.indicators.volume_behavior, VolumeBehavior::Unknown);
        assert_eq!(snapshot.indicators.volatility, Volatility::Unknown);
        assert_eq!(snapshot.raw.rsi, 50.0);
        assert_eq!(snapshot.raw.sma50, None);
    }

    #[test]
    fn test_fifty_bars_have_no_long_average() {
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + i as f64 * 0.1).collect();
        let snapshot = IndicatorEngine::daily().compute(&series_from_closes(&closes)).unwrap();

        assert_eq!(snapshot.indicators.overall_trend, Trend::Unknown);
        assert_eq!(snapshot.indicators.trend_strength, TrendStrength::Unknown);
        assert_eq!(snapshot.indicators.trend_duration_days, 0);
        assert!(snapshot.raw.sma50.is_some());
        assert_eq!(snapshot.raw.sma200, None);
        assert!(snapshot.raw.atr.is_some());
    }

    #[test]
    fn test_raw_values_serialize_missing_as_null() {
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let snapshot = IndicatorEngine::daily().compute(&series_from_closes(&closes)).unwrap();
        let json = serde_json::to_value(&snapshot.raw).unwrap();
        assert!(json["sma200"].is_null());
        assert_eq!(json["daysInTrend"], 0);
        assert_eq!(json["currentPrice"], 149.0);
    }
}
