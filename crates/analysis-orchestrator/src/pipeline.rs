use analysis_core::{AnalysisError, Granularity, PriceSeries};
use multi_timeframe::{aggregate_to_weekly, TimeframeAnalysis};
use scenario_engine::{generate_scenarios, Scenarios};
use serde::{Deserialize, Serialize};
use technical_analysis::{IndicatorEngine, IndicatorSet, RawValues, MIN_DAILY_BARS};
use tracing::{debug, info, warn};

use crate::config::AnalysisConfig;
use crate::data_quality::{check_data_quality, DataQualityReport};
use crate::interpretation::InterpreterPayload;
use crate::summary::{build_summary, StructuredSummary};
use crate::validation::{
    unresolved_fields, validate, ValidationResult, DEFAULT_MAX_UNKNOWN_FRACTION,
};

/// Validated result of one analysis, ready to hand to an interpreter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketBrief {
    pub symbol: String,
    pub summary: StructuredSummary,
    pub scenarios: Scenarios,
    pub validation: ValidationResult,
    pub weekly_indicators: IndicatorSet,
    pub raw_values: RawValues,
    pub data_quality: DataQualityReport,
}

impl MarketBrief {
    pub fn payload(&self) -> InterpreterPayload {
        InterpreterPayload::new(self.summary.clone(), self.scenarios.clone())
    }
}

/// Full deterministic pipeline over a daily series.
///
/// Fails with `InsufficientData` below the daily floor and with
/// `ValidationFailure` when too many summary fields remain unresolved after
/// defaults. Data-quality findings are reported but never fail the run.
///
/// The config can raise the daily floor and lower the gate threshold, never
/// the reverse.
pub fn analyze_market(
    series: &PriceSeries,
    symbol: &str,
    config: &AnalysisConfig,
) -> Result<MarketBrief, AnalysisError> {
    if series.granularity() != Granularity::Daily {
        return Err(AnalysisError::InvalidData(format!(
            "expected a daily series, got {}",
            series.granularity().name()
        )));
    }
    let min_daily_bars = config.min_daily_bars.max(MIN_DAILY_BARS);
    let max_unknown_fraction = config.max_unknown_fraction.min(DEFAULT_MAX_UNKNOWN_FRACTION);
    series.require(min_daily_bars)?;

    let data_quality = check_data_quality(series, config.max_gap_days);
    let weekly = aggregate_to_weekly(series, config.bars_per_week)?;

    let daily_engine = IndicatorEngine::new(min_daily_bars);
    let weekly_engine = IndicatorEngine::weekly();
    let (daily_snapshot, weekly_snapshot) = rayon::join(
        || daily_engine.compute(series),
        || weekly_engine.compute(&weekly),
    );
    let daily_snapshot = daily_snapshot?;
    let weekly_snapshot = weekly_snapshot?;

    let timeframes = TimeframeAnalysis::from_series(series, &weekly);
    let scenarios = generate_scenarios(
        &daily_snapshot.indicators,
        &weekly_snapshot.indicators,
        &timeframes.timeframe_conflict,
    );

    let summary = build_summary(
        &daily_snapshot.indicators,
        &daily_snapshot.raw,
        Some(timeframes),
    )
    .with_safe_defaults();

    let validation = validate(&summary, max_unknown_fraction);
    debug!(
        symbol,
        unknown_count = validation.unknown_count,
        total = validation.total_fields,
        "Summary validated"
    );

    if !validation.is_valid {
        let unresolved: Vec<String> = unresolved_fields(&summary)
            .iter()
            .map(ToString::to_string)
            .collect();
        warn!(
            symbol,
            unknown_count = validation.unknown_count,
            unknown_percentage = validation.unknown_percentage,
            unresolved = ?unresolved,
            "Summary rejected by validation gate"
        );
    }
    let validation = validation.into_result()?;

    info!(
        symbol,
        bars = series.len(),
        weekly_bars = weekly.len(),
        unknown_count = validation.unknown_count,
        "Validation passed"
    );

    Ok(MarketBrief {
        symbol: symbol.to_string(),
        summary,
        scenarios,
        validation,
        weekly_indicators: weekly_snapshot.indicators,
        raw_values: daily_snapshot.raw,
        data_quality,
    })
}
