//! The tracked fields of a structured summary.
//!
//! Default-filling and the validation gate both walk [`SummaryField::ALL`], so
//! adding a field here changes the gate's denominator as well.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryGroup {
    MarketData,
    IndicatorSignals,
    Context,
}

impl SummaryGroup {
    pub fn name(&self) -> &'static str {
        match self {
            SummaryGroup::MarketData => "marketData",
            SummaryGroup::IndicatorSignals => "indicatorSignals",
            SummaryGroup::Context => "context",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryField {
    OverallTrend,
    TrendDuration,
    VolumeBehavior,
    VolatilityLevel,
    Correlation,
    MarketBreadth,
    Momentum,
    TrendStrength,
    SupportResistance,
    RiskMode,
    Sentiment,
    SentimentVelocity,
    MacroContext,
}

impl SummaryField {
    pub const ALL: [SummaryField; 13] = [
        SummaryField::OverallTrend,
        SummaryField::TrendDuration,
        SummaryField::VolumeBehavior,
        SummaryField::VolatilityLevel,
        SummaryField::Correlation,
        SummaryField::MarketBreadth,
        SummaryField::Momentum,
        SummaryField::TrendStrength,
        SummaryField::SupportResistance,
        SummaryField::RiskMode,
        SummaryField::Sentiment,
        SummaryField::SentimentVelocity,
        SummaryField::MacroContext,
    ];

    /// Serialized (camelCase) name
    pub fn name(&self) -> &'static str {
        match self {
            SummaryField::OverallTrend => "overallTrend",
            SummaryField::TrendDuration => "trendDuration",
            SummaryField::VolumeBehavior => "volumeBehavior",
            SummaryField::VolatilityLevel => "volatilityLevel",
            SummaryField::Correlation => "correlation",
            SummaryField::MarketBreadth => "marketBreadth",
            SummaryField::Momentum => "momentum",
            SummaryField::TrendStrength => "trendStrength",
            SummaryField::SupportResistance => "supportResistance",
            SummaryField::RiskMode => "riskMode",
            SummaryField::Sentiment => "sentiment",
            SummaryField::SentimentVelocity => "sentimentVelocity",
            SummaryField::MacroContext => "macroContext",
        }
    }

    pub fn group(&self) -> SummaryGroup {
        use SummaryField::*;
        match self {
            OverallTrend | TrendDuration | VolumeBehavior | VolatilityLevel | Correlation
            | MarketBreadth => SummaryGroup::MarketData,
            Momentum | TrendStrength | SupportResistance | RiskMode => {
                SummaryGroup::IndicatorSignals
            }
            Sentiment | SentimentVelocity | MacroContext => SummaryGroup::Context,
        }
    }

    /// Value substituted for "Unknown" before validation. Trend, duration,
    /// volatility and momentum never get one.
    pub fn safe_default(&self) -> Option<&'static str> {
        match self {
            SummaryField::Sentiment => Some("Neutral"),
            SummaryField::SentimentVelocity => Some("Stable"),
            SummaryField::MacroContext => Some("Stable"),
            SummaryField::Correlation => Some("Normal"),
            SummaryField::MarketBreadth => Some("Neutral"),
            SummaryField::VolumeBehavior => Some("Neutral"),
            SummaryField::TrendStrength => Some("Moderate"),
            SummaryField::SupportResistance => Some("Near long-term support"),
            SummaryField::RiskMode => Some("Transitioning"),
            SummaryField::OverallTrend
            | SummaryField::TrendDuration
            | SummaryField::VolatilityLevel
            | SummaryField::Momentum => None,
        }
    }
}

impl fmt::Display for SummaryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group().name(), self.name())
    }
}
