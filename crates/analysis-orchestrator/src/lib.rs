//! Deterministic market brief pipeline and the service that hands its output
//! to an external interpreter.

pub mod config;
pub mod data_quality;
pub mod interpretation;
pub mod pipeline;
pub mod schema;
pub mod service;
pub mod summary;
pub mod validation;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod pipeline_tests;

pub use config::AnalysisConfig;
pub use data_quality::{check_data_quality, DataQualityReport, DataWarning};
pub use interpretation::{
    parse_section, InterpretationReport, InterpreterPayload, HEADINGS, SYSTEM_PROMPT,
};
pub use pipeline::{analyze_market, MarketBrief};
pub use schema::{SummaryField, SummaryGroup};
pub use service::{MarketBriefService, MarketOutlook};
pub use summary::{build_summary, IndicatorSignals, MarketContext, MarketData, StructuredSummary};
pub use validation::{count_unknown, validate, ValidationResult, TOTAL_FIELDS};
