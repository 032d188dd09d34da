//! Label derivation from raw indicator values.
//!
//! Every function here is total: missing history yields an `Unknown` label
//! instead of an error.

use analysis_core::{
    Momentum, PriceBar, RiskMode, SupportResistance, Trend, TrendDuration, TrendStrength,
    Volatility, VolumeBehavior,
};
use serde::{Deserialize, Serialize};

use crate::indicators::{latest, mean, sma};

pub const SHORT_MA: usize = 20;
pub const MEDIUM_MA: usize = 50;
pub const LONG_MA: usize = 200;

/// ATR values averaged when judging volatility
pub const VOLATILITY_LOOKBACK: usize = 30;
/// Bars inspected for volume behavior and range position
pub const RECENT_WINDOW: usize = 20;

/// Trend direction plus how many consecutive bars it has held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReading {
    pub trend: Trend,
    pub days_in_trend: usize,
}

impl TrendReading {
    pub fn unknown() -> Self {
        Self {
            trend: Trend::Unknown,
            days_in_trend: 0,
        }
    }

    pub fn is_known(&self) -> bool {
        self.trend != Trend::Unknown
    }
}

/// SMA50 vs SMA200 on the latest bar, counting back while the relationship holds
pub fn detect_trend(closes: &[f64]) -> TrendReading {
    let sma_medium = sma(closes, MEDIUM_MA);
    let sma_long = sma(closes, LONG_MA);

    let (Some(medium), Some(long)) = (latest(&sma_medium), latest(&sma_long)) else {
        return TrendReading::unknown();
    };
    let is_uptrend = medium > long;

    let days_in_trend = sma_medium
        .iter()
        .zip(&sma_long)
        .rev()
        .map_while(|pair| match pair {
            (Some(m), Some(l)) => Some(*m > *l),
            _ => None,
        })
        .take_while(|&was_uptrend| was_uptrend == is_uptrend)
        .count();

    TrendReading {
        trend: if is_uptrend { Trend::Upward } else { Trend::Downward },
        days_in_trend,
    }
}

pub fn duration_label(days: usize) -> TrendDuration {
    match days {
        d if d < 14 => TrendDuration::Early,
        d if d < 28 => TrendDuration::Developing,
        d if d < 60 => TrendDuration::Established,
        d if d < 120 => TrendDuration::Mature,
        _ => TrendDuration::Extended,
    }
}

pub fn momentum_label(rsi: f64) -> Momentum {
    if rsi > 70.0 {
        Momentum::Overbought
    } else if rsi > 60.0 {
        Momentum::Positive
    } else if (40.0..=60.0).contains(&rsi) {
        Momentum::Slowing
    } else if rsi >= 30.0 {
        Momentum::Negative
    } else {
        Momentum::Oversold
    }
}

/// Current ATR against its 30-value average, then ATR as a share of price.
///
/// Expansion and contraction take priority over the absolute level.
pub fn volatility_label(atr: &[Option<f64>], price: f64) -> Volatility {
    let defined: Vec<f64> = atr.iter().flatten().copied().collect();
    if defined.len() < VOLATILITY_LOOKBACK {
        return Volatility::Unknown;
    }

    let current = defined[defined.len() - 1];
    let average = mean(&defined[defined.len() - VOLATILITY_LOOKBACK..]);

    if current > average * 1.3 {
        return Volatility::Increasing;
    }
    if current < average * 0.8 {
        return Volatility::Decreasing;
    }

    let atr_percent = if price > 0.0 { current / price * 100.0 } else { 0.0 };
    if atr_percent > 2.0 {
        Volatility::Elevated
    } else {
        Volatility::Stable
    }
}

/// Mean volume of up-days (close > open) against everything else, trailing 20 bars
pub fn volume_behavior(bars: &[PriceBar]) -> VolumeBehavior {
    if bars.len() < RECENT_WINDOW {
        return VolumeBehavior::Unknown;
    }

    let (up, down): (Vec<&PriceBar>, Vec<&PriceBar>) = bars[bars.len() - RECENT_WINDOW..]
        .iter()
        .partition(|b| b.close > b.open);

    let avg_volume = |group: &[&PriceBar]| {
        if group.is_empty() {
            0.0
        } else {
            group.iter().map(|b| b.volume).sum::<f64>() / group.len() as f64
        }
    };
    let avg_up = avg_volume(&up[..]);
    let avg_down = avg_volume(&down[..]);

    if avg_up > avg_down * 1.2 {
        VolumeBehavior::Confirming
    } else if avg_down > avg_up * 1.2 {
        VolumeBehavior::Distribution
    } else {
        VolumeBehavior::Neutral
    }
}

pub fn trend_strength(closes: &[f64]) -> TrendStrength {
    let ma20 = latest(&sma(closes, SHORT_MA));
    let ma50 = latest(&sma(closes, MEDIUM_MA));
    let ma200 = latest(&sma(closes, LONG_MA));

    let (Some(ma20), Some(ma50), Some(ma200), Some(&price)) = (ma20, ma50, ma200, closes.last())
    else {
        return TrendStrength::Unknown;
    };

    if price > ma20 && ma20 > ma50 && ma50 > ma200 {
        TrendStrength::Strong
    } else if price < ma20 && ma20 < ma50 && ma50 < ma200 {
        TrendStrength::StrongBearish
    } else if price > ma50 && ma50 > ma200 {
        TrendStrength::Moderate
    } else if price < ma50 && ma50 < ma200 {
        TrendStrength::ModerateBearish
    } else {
        TrendStrength::Weak
    }
}

/// Where the latest close sits inside the trailing 20-close high/low range
pub fn support_resistance(closes: &[f64]) -> SupportResistance {
    if closes.len() < RECENT_WINDOW {
        return SupportResistance::Unknown;
    }

    let recent = &closes[closes.len() - RECENT_WINDOW..];
    let current = recent[recent.len() - 1];
    let high = recent.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let low = recent.iter().copied().fold(f64::INFINITY, f64::min);
    let range = high - low;

    // Flat window: no meaningful position
    if range <= 0.0 {
        return SupportResistance::MidRange;
    }

    let position = (current - low) / range;
    if position > 0.9 {
        SupportResistance::NearResistance
    } else if position < 0.1 {
        SupportResistance::NearSupport
    } else if position > 0.7 {
        SupportResistance::UpperRange
    } else if position < 0.3 {
        SupportResistance::LowerRange
    } else {
        SupportResistance::MidRange
    }
}

pub fn risk_mode(volatility: Volatility, momentum: Momentum, volume: VolumeBehavior) -> RiskMode {
    let flags = [
        matches!(volatility, Volatility::Increasing | Volatility::Elevated),
        matches!(momentum, Momentum::Overbought | Momentum::Oversold),
        volume == VolumeBehavior::Distribution,
    ]
    .iter()
    .filter(|&&flag| flag)
    .count();

    if flags >= 2 {
        RiskMode::RiskOff
    } else if flags == 0 && volume == VolumeBehavior::Confirming {
        RiskMode::RiskOn
    } else {
        RiskMode::Neutral
    }
}
