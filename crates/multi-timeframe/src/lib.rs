pub mod aggregation;

pub use aggregation::*;

use analysis_core::{Confidence, DirectionalBias, PriceSeries, Trend, TrendDuration, Volatility};
use serde::{Deserialize, Serialize};
use technical_analysis::{atr, detect_trend, duration_label, volatility_label, TrendReading, ATR_PERIOD};
use tracing::debug;

/// Confidence escalation by trend age, highest threshold first.
///
/// Scanned top-down with early exit, so a 95-day trend can only ever land on
/// Medium-High even though it also clears the 60-day row.
const CONFIDENCE_TABLE: &[(usize, Confidence)] = &[
    (90, Confidence::MediumHigh),
    (60, Confidence::Medium),
];

/// Directional read of one granularity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeframeProfile {
    pub directional_bias: DirectionalBias,
    pub confidence: Confidence,
    pub trend_maturity: TrendDuration,
    pub volatility: Volatility,
}

/// Disagreement between the daily and weekly bias
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeConflict {
    pub exists: bool,
    pub description: String,
}

/// Daily and weekly profiles together with their conflict check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeframeAnalysis {
    pub daily: TimeframeProfile,
    pub weekly: TimeframeProfile,
    pub timeframe_conflict: TimeframeConflict,
}

impl TimeframeAnalysis {
    pub fn from_series(daily: &PriceSeries, weekly: &PriceSeries) -> Self {
        let daily = analyze_timeframe(daily);
        let weekly = analyze_timeframe(weekly);
        let timeframe_conflict = detect_conflict(&daily, &weekly);

        debug!(
            daily_bias = %daily.directional_bias,
            weekly_bias = %weekly.directional_bias,
            conflict = timeframe_conflict.exists,
            "Timeframe analysis"
        );

        Self {
            daily,
            weekly,
            timeframe_conflict,
        }
    }
}

pub fn directional_bias(trend: Trend) -> DirectionalBias {
    match trend {
        Trend::Upward => DirectionalBias::Bullish,
        Trend::Downward => DirectionalBias::Bearish,
        Trend::Unknown => DirectionalBias::Neutral,
    }
}

/// Confidence driven purely by trend maturity. Unknown trends stay Low.
pub fn confidence_for(reading: &TrendReading) -> Confidence {
    if !reading.is_known() {
        return Confidence::Low;
    }
    CONFIDENCE_TABLE
        .iter()
        .find(|(min_days, _)| reading.days_in_trend >= *min_days)
        .map(|(_, confidence)| *confidence)
        .unwrap_or(Confidence::Low)
}

/// Trend, maturity and ATR volatility for a daily or weekly series
pub fn analyze_timeframe(series: &PriceSeries) -> TimeframeProfile {
    let closes = series.closes();
    let reading = detect_trend(&closes);
    let atr_values = atr(series.bars(), ATR_PERIOD);
    let price = closes.last().copied().unwrap_or(0.0);

    TimeframeProfile {
        directional_bias: directional_bias(reading.trend),
        confidence: confidence_for(&reading),
        trend_maturity: duration_label(reading.days_in_trend),
        volatility: volatility_label(&atr_values, price),
    }
}

pub fn detect_conflict(daily: &TimeframeProfile, weekly: &TimeframeProfile) -> TimeframeConflict {
    use DirectionalBias::*;

    let description = match (daily.directional_bias, weekly.directional_bias) {
        (d, w) if d == w || d == Neutral || w == Neutral => {
            return TimeframeConflict {
                exists: false,
                description: "Daily and weekly timeframes are aligned or neutral.".to_string(),
            };
        }
        (Bearish, Bullish) => "Short-term bearish pullback within a longer-term bullish trend. \
             This may represent a corrective move or potential trend reversal."
            .to_string(),
        (Bullish, Bearish) => "Short-term bullish bounce within a longer-term bearish trend. \
             This may represent a relief rally or potential trend reversal."
            .to_string(),
        (d, w) => format!(
            "Daily bias ({d}) conflicts with weekly bias ({w}). \
             Exercise caution as timeframes disagree."
        ),
    };

    TimeframeConflict {
        exists: true,
        description,
    }
}
