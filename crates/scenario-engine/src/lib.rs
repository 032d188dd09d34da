//! Conditional scenario narratives.
//!
//! Narratives are assembled from a fixed decision table over the daily
//! indicator labels and the timeframe conflict. Each one is an IF/THEN
//! statement describing what would have to happen, never a forecast.

use analysis_core::{Momentum, Trend, TrendStrength, Volatility, VolumeBehavior};
use multi_timeframe::TimeframeConflict;
use serde::{Deserialize, Serialize};
use technical_analysis::IndicatorSet;
use tracing::debug;

pub const FALLBACK_TRIGGER: &str = "Significant change in trend direction or momentum";

/// Bullish, bearish and neutral narratives plus the conditions that would
/// invalidate the current read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenarios {
    pub bullish_scenario: String,
    pub bearish_scenario: String,
    pub neutral_scenario: String,
    /// Never empty
    pub invalidation_triggers: Vec<String>,
}

/// "IF <conditions>, THEN <outcome>." followed by optional qualifiers
struct Narrative {
    condition: &'static str,
    outcome: &'static str,
    qualifiers: Vec<&'static str>,
}

impl Narrative {
    fn new(condition: &'static str, outcome: &'static str) -> Self {
        Self {
            condition,
            outcome,
            qualifiers: Vec::new(),
        }
    }

    fn qualify_if(mut self, applies: bool, qualifier: &'static str) -> Self {
        if applies {
            self.qualifiers.push(qualifier);
        }
        self
    }

    fn render(&self) -> String {
        let mut text = format!("IF {}, THEN {}.", self.condition, self.outcome);
        for qualifier in &self.qualifiers {
            text.push(' ');
            text.push_str(qualifier);
        }
        text
    }
}

pub fn generate_scenarios(
    daily: &IndicatorSet,
    weekly: &IndicatorSet,
    conflict: &TimeframeConflict,
) -> Scenarios {
    let scenarios = Scenarios {
        bullish_scenario: bullish(daily, weekly).render(),
        bearish_scenario: bearish(daily, weekly).render(),
        neutral_scenario: neutral(daily, conflict).render(),
        invalidation_triggers: invalidation_triggers(daily, conflict),
    };

    debug!(
        triggers = scenarios.invalidation_triggers.len(),
        conflict = conflict.exists,
        "Scenarios generated"
    );

    scenarios
}

fn bullish(daily: &IndicatorSet, weekly: &IndicatorSet) -> Narrative {
    match daily.overall_trend {
        Trend::Upward => Narrative::new(
            "uptrend persists AND volume confirms direction",
            "bullish momentum may continue",
        )
        .qualify_if(
            matches!(daily.momentum, Momentum::Positive | Momentum::Overbought),
            "Positive momentum supports continuation.",
        )
        .qualify_if(
            matches!(daily.trend_strength, TrendStrength::Strong | TrendStrength::Moderate),
            "Trend structure remains intact.",
        )
        .qualify_if(
            weekly.overall_trend == Trend::Upward,
            "Weekly trend points the same way.",
        ),
        Trend::Downward => Narrative::new(
            "price reclaims short-term moving averages AND volume expands on up moves",
            "a reversal setup may develop",
        ),
        Trend::Unknown => Narrative::new(
            "consolidation resolves to the upside with expanding volume",
            "bullish bias may emerge",
        ),
    }
}

fn bearish(daily: &IndicatorSet, weekly: &IndicatorSet) -> Narrative {
    match daily.overall_trend {
        Trend::Downward => Narrative::new(
            "downtrend persists AND selling pressure continues",
            "bearish momentum may extend",
        )
        .qualify_if(
            matches!(daily.momentum, Momentum::Negative | Momentum::Oversold),
            "Negative momentum supports continuation.",
        )
        .qualify_if(
            weekly.overall_trend == Trend::Downward,
            "Weekly trend points the same way.",
        ),
        Trend::Upward => Narrative::new(
            "price breaks below key support AND volume expands on down moves",
            "a reversal setup may develop",
        )
        .qualify_if(
            daily.volume_behavior == VolumeBehavior::Distribution,
            "Current distribution pattern warrants caution.",
        ),
        Trend::Unknown => Narrative::new(
            "consolidation breaks down with expanding volume",
            "bearish bias may emerge",
        ),
    }
}

/// First match wins: conflict, then volatility, then the quiet default
fn neutral(daily: &IndicatorSet, conflict: &TimeframeConflict) -> Narrative {
    if conflict.exists {
        Narrative::new(
            "timeframe conflict persists AND signals remain mixed",
            "range-bound action is more likely",
        )
    } else if matches!(daily.volatility, Volatility::Increasing | Volatility::Elevated) {
        Narrative::new(
            "volatility remains elevated AND direction is unclear",
            "choppy conditions may persist",
        )
    } else {
        Narrative::new(
            "neither bulls nor bears gain control AND volume remains muted",
            "sideways drift continues",
        )
    }
}

fn invalidation_triggers(daily: &IndicatorSet, conflict: &TimeframeConflict) -> Vec<String> {
    let mut triggers: Vec<&str> = Vec::new();

    match daily.overall_trend {
        Trend::Upward => triggers.extend([
            "Break below 50-day moving average with expanding volume",
            "RSI divergence forming lower highs while price makes higher highs",
        ]),
        Trend::Downward => triggers.extend([
            "Break above 50-day moving average with expanding volume",
            "RSI divergence forming higher lows while price makes lower lows",
        ]),
        Trend::Unknown => {}
    }

    if daily.volatility == Volatility::Increasing {
        triggers.push("Volatility spike beyond recent range");
    }
    if daily.volume_behavior == VolumeBehavior::Distribution {
        triggers.push("Sustained distribution pattern lasting more than 2 weeks");
    }
    if conflict.exists {
        triggers.push("Weekly timeframe confirms daily direction (conflict resolution)");
    }
    if triggers.is_empty() {
        triggers.push(FALLBACK_TRIGGER);
    }

    triggers.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::{RiskMode, SupportResistance, TrendDuration};

    fn indicators(trend: Trend) -> IndicatorSet {
        IndicatorSet {
            overall_trend: trend,
            trend_duration_days: 30,
            trend_duration: TrendDuration::Established,
            volume_behavior: VolumeBehavior::Neutral,
            volatility: Volatility::Stable,
            momentum: Momentum::Slowing,
            trend_strength: TrendStrength::Weak,
            support_resistance: SupportResistance::MidRange,
            risk_mode: RiskMode::Neutral,
        }
    }

    fn conflict(exists: bool) -> TimeframeConflict {
        TimeframeConflict {
            exists,
            description: String::new(),
        }
    }

    #[test]
    fn test_triggers_never_empty() {
        for &trend in Trend::ALL {
            for &volatility in Volatility::ALL {
                for &volume in VolumeBehavior::ALL {
                    for &momentum in Momentum::ALL {
                        for &strength in TrendStrength::ALL {
                            for exists in [false, true] {
                                let mut daily = indicators(trend);
                                daily.volatility = volatility;
                                daily.volume_behavior = volume;
                                daily.momentum = momentum;
                                daily.trend_strength = strength;

                                let s = generate_scenarios(&daily, &indicators(trend), &conflict(exists));
                                assert!(!s.invalidation_triggers.is_empty());
                                for text in [&s.bullish_scenario, &s.bearish_scenario, &s.neutral_scenario] {
                                    assert!(text.starts_with("IF "));
                                    assert!(text.contains(", THEN "));
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_fallback_only_when_nothing_applies() {
        let s = generate_scenarios(
            &indicators(Trend::Unknown),
            &indicators(Trend::Unknown),
            &conflict(false),
        );
        assert_eq!(s.invalidation_triggers, vec![FALLBACK_TRIGGER.to_string()]);

        let s = generate_scenarios(
            &indicators(Trend::Upward),
            &indicators(Trend::Unknown),
            &conflict(false),
        );
        assert!(!s.invalidation_triggers.iter().any(|t| t == FALLBACK_TRIGGER));
    }

    #[test]
    fn test_trigger_order() {
        let mut daily = indicators(Trend::Downward);
        daily.volatility = Volatility::Increasing;
        daily.volume_behavior = VolumeBehavior::Distribution;

        let s = generate_scenarios(&daily, &indicators(Trend::Upward), &conflict(true));
        assert_eq!(
            s.invalidation_triggers,
            vec![
                "Break above 50-day moving average with expanding volume",
                "RSI divergence forming higher lows while price makes lower lows",
                "Volatility spike beyond recent range",
                "Sustained distribution pattern lasting more than 2 weeks",
                "Weekly timeframe confirms daily direction (conflict resolution)",
            ]
        );
    }

    #[test]
    fn test_bullish_qualifiers() {
        let mut daily = indicators(Trend::Upward);
        daily.momentum = Momentum::Positive;
        daily.trend_strength = TrendStrength::Strong;

        let s = generate_scenarios(&daily, &indicators(Trend::Upward), &conflict(false));
        assert_eq!(
            s.bullish_scenario,
            "IF uptrend persists AND volume confirms direction, THEN bullish momentum may continue. \
             Positive momentum supports continuation. Trend structure remains intact. \
             Weekly trend points the same way."
        );

        let plain = generate_scenarios(&indicators(Trend::Upward), &indicators(Trend::Downward), &conflict(true));
        assert_eq!(
            plain.bullish_scenario,
            "IF uptrend persists AND volume confirms direction, THEN bullish momentum may continue."
        );
    }

    #[test]
    fn test_bearish_branches() {
        let mut up = indicators(Trend::Upward);
        up.volume_behavior = VolumeBehavior::Distribution;
        let s = generate_scenarios(&up, &indicators(Trend::Upward), &conflict(false));
        assert!(s.bearish_scenario.starts_with("IF price breaks below key support"));
        assert!(s.bearish_scenario.ends_with("Current distribution pattern warrants caution."));

        let mut down = indicators(Trend::Downward);
        down.momentum = Momentum::Oversold;
        let s = generate_scenarios(&down, &indicators(Trend::Unknown), &conflict(false));
        assert!(s.bearish_scenario.contains("bearish momentum may extend"));
        assert!(s.bearish_scenario.ends_with("Negative momentum supports continuation."));
        assert!(s.bullish_scenario.contains("reversal setup"));
    }

    #[test]
    fn test_neutral_priority() {
        let mut volatile = indicators(Trend::Upward);
        volatile.volatility = Volatility::Elevated;

        let with_conflict = generate_scenarios(&volatile, &indicators(Trend::Downward), &conflict(true));
        assert!(with_conflict.neutral_scenario.contains("timeframe conflict persists"));

        let without_conflict = generate_scenarios(&volatile, &indicators(Trend::Upward), &conflict(false));
        assert!(without_conflict.neutral_scenario.contains("volatility remains elevated"));

        let quiet = generate_scenarios(&indicators(Trend::Upward), &indicators(Trend::Upward), &conflict(false));
        assert!(quiet.neutral_scenario.contains("sideways drift continues"));
    }

    #[test]
    fn test_serialized_field_names() {
        let s = generate_scenarios(&indicators(Trend::Unknown), &indicators(Trend::Unknown), &conflict(false));
        let json = serde_json::to_value(&s).unwrap();
        for key in ["bullishScenario", "bearishScenario", "neutralScenario", "invalidationTriggers"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
