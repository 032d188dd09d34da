//! Contract with the external interpreter: the instruction prompt, the JSON
//! payload it receives and the parser for its sectioned plain-text reply.

use analysis_core::AnalysisError;
use scenario_engine::Scenarios;
use serde::{Deserialize, Serialize};

use crate::summary::StructuredSummary;

/// Output headings, in the order the interpreter must emit them
pub const HEADINGS: [&str; 15] = [
    "DIRECTIONAL BIAS",
    "CONFIDENCE LEVEL",
    "CONFIDENCE REASONING",
    "MARKET REGIME",
    "VOLATILITY EXPECTATION",
    "SIGNAL AGREEMENT",
    "TREND MATURITY",
    "TIMEFRAME ANALYSIS",
    "SUPPORTING FACTORS",
    "RISK FACTORS",
    "SCENARIO ANALYSIS",
    "INVALIDATION TRIGGERS",
    "UPGRADE BLOCKERS",
    "UNCERTAINTY ASSESSMENT",
    "INTERPRETATION SUMMARY",
];

const SUMMARY_FALLBACK_CHARS: usize = 500;

pub const SYSTEM_PROMPT: &str = "\
You are a market interpretation assistant. You explain a pre-computed, deterministic market \
summary. You do not predict prices, assign probabilities or give buy, sell or hold instructions. \
When the data is unclear or contradictory, say so and lower your confidence.

INPUT (JSON, use only these fields):
marketData: overallTrend, trendDuration, volumeBehavior, volatilityLevel, correlation, marketBreadth
indicatorSignals: momentum, trendStrength, supportResistance, riskMode
context: sentiment, sentimentVelocity, macroContext
notes: list of observations
timeframes: daily and weekly { directionalBias, confidence, trendMaturity, volatility }, \
timeframeConflict { exists, description }
scenarios: bullishScenario, bearishScenario, neutralScenario (IF-THEN conditionals), \
invalidationTriggers (list)

REGIME FIRST:
Classify the regime (Normal / Uncertain / Crisis) before reading direction. If it is not \
Normal, cap confidence and use more uncertainty language.

TIMEFRAME CONFLICT:
If timeframeConflict.exists is true, explain it prominently, cap confidence at Medium and \
favor Neutral unless the weekly trend is very mature. Say whether the daily move looks like a \
pullback or a reversal.

FAILURE AND SAFETY:
If the data conflicts heavily, inputs are incomplete, reliability is low or the timeframes \
strongly conflict, set Directional Bias to Neutral and Confidence to Low and state the \
limitations. Fail safe, never confident.

CONFIDENCE CAPS (override everything else):
- Timeframe conflict: at most Medium
- Uncertain regime: at most Medium
- Low signal agreement: at most Low
- Counter-trend move: at most Low
- Distribution or topping: at most Medium
- Rising volatility with narrow breadth: at most Medium-High
High confidence is rare and requires full confirmation across timeframes.

OUTPUT: plain text only, no JSON, no code blocks, no extra sections. Use exactly these \
headings, each on its own line, in this order:

DIRECTIONAL BIAS
[Bullish / Bearish / Neutral]

CONFIDENCE LEVEL
[Low / Medium / Medium-High / High]

CONFIDENCE REASONING
[2-4 sentences, including timeframe alignment]

MARKET REGIME
[Normal / Uncertain / Crisis]

VOLATILITY EXPECTATION
[Stable / Increasing / Elevated / High]

SIGNAL AGREEMENT
[Low / Moderate / High]

TREND MATURITY
[the trend maturity label]

TIMEFRAME ANALYSIS
[daily vs weekly alignment; explain any conflict prominently]

SUPPORTING FACTORS
[bullet points taken strictly from the input]

RISK FACTORS
[bullet points on weaknesses and invalidation risks]

SCENARIO ANALYSIS
[the three scenarios as conditional IF-THEN statements]

INVALIDATION TRIGGERS
[conditions that would invalidate this interpretation]

UPGRADE BLOCKERS
[what prevents higher confidence, or None]

UNCERTAINTY ASSESSMENT
[ambiguity, conflicts or reduced reliability]

INTERPRETATION SUMMARY
[a neutral, non-actionable explanation of what the signals suggest]
";

/// Summary fields at the top level plus the scenario bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpreterPayload {
    #[serde(flatten)]
    pub summary: StructuredSummary,
    pub scenarios: Scenarios,
}

impl InterpreterPayload {
    pub fn new(summary: StructuredSummary, scenarios: Scenarios) -> Self {
        Self { summary, scenarios }
    }

    pub fn to_json(&self) -> Result<String, AnalysisError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::InvalidData(format!("failed to serialize payload: {e}")))
    }
}

/// The interpreter's reply split by heading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretationReport {
    pub directional_bias: String,
    pub confidence_level: String,
    pub confidence_reasoning: String,
    pub market_regime: String,
    pub volatility_expectation: String,
    pub signal_agreement: String,
    pub trend_maturity: String,
    pub timeframe_analysis: String,
    pub supporting_factors: String,
    pub risk_factors: String,
    pub scenario_analysis: String,
    pub invalidation_triggers: String,
    pub upgrade_blockers: String,
    pub uncertainty_assessment: String,
    pub interpretation_summary: String,
    pub raw_response: String,
}

impl InterpretationReport {
    /// Never fails: every missing or empty section gets its fallback.
    pub fn parse(reply: &str) -> Self {
        let section = |heading: &str, fallback: &str| {
            parse_section(reply, heading).unwrap_or_else(|| fallback.to_string())
        };

        Self {
            directional_bias: section("DIRECTIONAL BIAS", "Neutral"),
            confidence_level: section("CONFIDENCE LEVEL", "Low"),
            confidence_reasoning: section(
                "CONFIDENCE REASONING",
                "Unable to determine confidence reasoning",
            ),
            market_regime: section("MARKET REGIME", "Uncertain"),
            volatility_expectation: section("VOLATILITY EXPECTATION", "Stable"),
            signal_agreement: section("SIGNAL AGREEMENT", "Low"),
            trend_maturity: section("TREND MATURITY", "Unknown"),
            timeframe_analysis: section("TIMEFRAME ANALYSIS", "Timeframe analysis not available"),
            supporting_factors: section("SUPPORTING FACTORS", "No supporting factors identified"),
            risk_factors: section("RISK FACTORS", "No risk factors identified"),
            scenario_analysis: section("SCENARIO ANALYSIS", "Scenario analysis not available"),
            invalidation_triggers: section(
                "INVALIDATION TRIGGERS",
                "No invalidation triggers identified",
            ),
            upgrade_blockers: section("UPGRADE BLOCKERS", "Unable to determine upgrade blockers"),
            uncertainty_assessment: section(
                "UNCERTAINTY ASSESSMENT",
                "Uncertainty assessment not available",
            ),
            interpretation_summary: parse_section(reply, "INTERPRETATION SUMMARY")
                .unwrap_or_else(|| reply.chars().take(SUMMARY_FALLBACK_CHARS).collect()),
            raw_response: reply.to_string(),
        }
    }
}

/// Strip markdown decoration models like to add around headings
fn normalize(line: &str) -> &str {
    line.trim()
        .trim_matches(|c: char| c == '#' || c == '*' || c == ':' || c.is_whitespace())
}

fn is_heading_line(line: &str) -> bool {
    let text = normalize(line);
    if HEADINGS.iter().any(|h| text.eq_ignore_ascii_case(h)) {
        return true;
    }
    // Unlisted all-caps headings still close the previous section
    text.contains(' ')
        && text.chars().all(|c| c.is_ascii_uppercase() || c == ' ')
}

/// Body under `heading` (matched case-insensitively) up to the next heading
/// line, trimmed. `None` when the heading is absent or its body is empty.
pub fn parse_section(text: &str, heading: &str) -> Option<String> {
    let mut lines = text.lines();
    lines.find(|line| normalize(line).eq_ignore_ascii_case(heading))?;

    let body = lines
        .take_while(|line| !is_heading_line(line))
        .collect::<Vec<_>>()
        .join("\n");
    let body = body.trim();

    (!body.is_empty()).then(|| body.to_string())
}
