use analysis_core::{SupportResistance, Trend, Volatility, VolumeBehavior, UNKNOWN};
use multi_timeframe::TimeframeAnalysis;
use serde::{Deserialize, Serialize};
use technical_analysis::{IndicatorSet, RawValues};

use crate::schema::SummaryField;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    pub overall_trend: String,
    pub trend_duration: String,
    pub volume_behavior: String,
    pub volatility_level: String,
    pub correlation: String,
    pub market_breadth: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSignals {
    pub momentum: String,
    pub trend_strength: String,
    pub support_resistance: String,
    pub risk_mode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketContext {
    pub sentiment: String,
    pub sentiment_velocity: String,
    pub macro_context: String,
}

/// Interpreter-facing view of one analysis.
///
/// Fields are strings: default-filling writes values such as "Transitioning"
/// that no indicator label produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredSummary {
    pub market_data: MarketData,
    pub indicator_signals: IndicatorSignals,
    pub context: MarketContext,
    pub notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframes: Option<TimeframeAnalysis>,
}

impl StructuredSummary {
    pub fn get(&self, field: SummaryField) -> &str {
        match field {
            SummaryField::OverallTrend => &self.market_data.overall_trend,
            SummaryField::TrendDuration => &self.market_data.trend_duration,
            SummaryField::VolumeBehavior => &self.market_data.volume_behavior,
            SummaryField::VolatilityLevel => &self.market_data.volatility_level,
            SummaryField::Correlation => &self.market_data.correlation,
            SummaryField::MarketBreadth => &self.market_data.market_breadth,
            SummaryField::Momentum => &self.indicator_signals.momentum,
            SummaryField::TrendStrength => &self.indicator_signals.trend_strength,
            SummaryField::SupportResistance => &self.indicator_signals.support_resistance,
            SummaryField::RiskMode => &self.indicator_signals.risk_mode,
            SummaryField::Sentiment => &self.context.sentiment,
            SummaryField::SentimentVelocity => &self.context.sentiment_velocity,
            SummaryField::MacroContext => &self.context.macro_context,
        }
    }

    pub(crate) fn slot_mut(&mut self, field: SummaryField) -> &mut String {
        match field {
            SummaryField::OverallTrend => &mut self.market_data.overall_trend,
            SummaryField::TrendDuration => &mut self.market_data.trend_duration,
            SummaryField::VolumeBehavior => &mut self.market_data.volume_behavior,
            SummaryField::VolatilityLevel => &mut self.market_data.volatility_level,
            SummaryField::Correlation => &mut self.market_data.correlation,
            SummaryField::MarketBreadth => &mut self.market_data.market_breadth,
            SummaryField::Momentum => &mut self.indicator_signals.momentum,
            SummaryField::TrendStrength => &mut self.indicator_signals.trend_strength,
            SummaryField::SupportResistance => &mut self.indicator_signals.support_resistance,
            SummaryField::RiskMode => &mut self.indicator_signals.risk_mode,
            SummaryField::Sentiment => &mut self.context.sentiment,
            SummaryField::SentimentVelocity => &mut self.context.sentiment_velocity,
            SummaryField::MacroContext => &mut self.context.macro_context,
        }
    }

    /// Replace "Unknown" with each field's safe default, where it has one.
    /// Everything else, including notes and timeframes, passes through.
    pub fn with_safe_defaults(mut self) -> Self {
        for field in SummaryField::ALL {
            if let Some(default) = field.safe_default() {
                let slot = self.slot_mut(field);
                if slot == UNKNOWN {
                    *slot = default.to_string();
                }
            }
        }
        self
    }
}

/// Summary of the daily indicators. External context fields start out Unknown.
pub fn build_summary(
    indicators: &IndicatorSet,
    raw: &RawValues,
    timeframes: Option<TimeframeAnalysis>,
) -> StructuredSummary {
    StructuredSummary {
        market_data: MarketData {
            overall_trend: indicators.overall_trend.to_string(),
            trend_duration: indicators.trend_duration.to_string(),
            volume_behavior: indicators.volume_behavior.to_string(),
            volatility_level: indicators.volatility.to_string(),
            correlation: UNKNOWN.to_string(),
            market_breadth: UNKNOWN.to_string(),
        },
        indicator_signals: IndicatorSignals {
            momentum: indicators.momentum.to_string(),
            trend_strength: indicators.trend_strength.to_string(),
            support_resistance: indicators.support_resistance.to_string(),
            risk_mode: indicators.risk_mode.to_string(),
        },
        context: MarketContext {
            sentiment: UNKNOWN.to_string(),
            sentiment_velocity: UNKNOWN.to_string(),
            macro_context: UNKNOWN.to_string(),
        },
        notes: build_notes(indicators, raw),
        timeframes,
    }
}

fn build_notes(indicators: &IndicatorSet, raw: &RawValues) -> Vec<String> {
    let mut notes = Vec::new();
    let rsi = raw.rsi;

    if rsi > 70.0 {
        notes.push(format!("RSI at {rsi} indicates overbought conditions"));
    } else if rsi < 30.0 {
        notes.push(format!("RSI at {rsi} indicates oversold conditions"));
    } else if rsi > 60.0 {
        notes.push(format!("RSI at {rsi} suggests positive momentum"));
    } else if rsi < 40.0 {
        notes.push(format!("RSI at {rsi} suggests weakening momentum"));
    }

    // A zero count on an Unknown trend means "no trend", not "young trend"
    if indicators.overall_trend != Trend::Unknown {
        let days = raw.days_in_trend;
        if days > 60 {
            notes.push(format!("Trend has persisted for {days} days - mature phase"));
        } else if days < 14 {
            notes.push(format!("Trend is only {days} days old - early formation"));
        }
    }

    match indicators.volume_behavior {
        VolumeBehavior::Distribution => notes.push(
            "Volume pattern suggests distribution/accumulation by larger players".to_string(),
        ),
        VolumeBehavior::Confirming => notes.push("Volume confirms price direction".to_string()),
        _ => {}
    }

    match indicators.volatility {
        Volatility::Increasing => {
            notes.push("Volatility is expanding - increased uncertainty".to_string())
        }
        Volatility::Elevated => notes.push("Elevated volatility environment persists".to_string()),
        _ => {}
    }

    match indicators.support_resistance {
        SupportResistance::NearResistance => {
            notes.push("Price approaching key resistance levels".to_string())
        }
        SupportResistance::NearSupport => notes.push("Price near key support levels".to_string()),
        _ => {}
    }

    notes
}
