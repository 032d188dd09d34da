use analysis_core::{AnalysisError, UNKNOWN};
use serde::{Deserialize, Serialize};

use crate::schema::SummaryField;
use crate::summary::StructuredSummary;

/// Largest share of unresolved fields a summary may carry and still be interpreted
pub const DEFAULT_MAX_UNKNOWN_FRACTION: f64 = 0.30;

pub const TOTAL_FIELDS: usize = SummaryField::ALL.len();

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub unknown_count: usize,
    pub unknown_percentage: f64,
    pub total_fields: usize,
}

impl ValidationResult {
    /// `Ok(self)` when valid, otherwise the matching `ValidationFailure`
    pub fn into_result(self) -> Result<Self, AnalysisError> {
        if self.is_valid {
            Ok(self)
        } else {
            Err(AnalysisError::ValidationFailure {
                unknown_count: self.unknown_count,
                total: self.total_fields,
            })
        }
    }
}

fn is_unresolved(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == UNKNOWN || value == "N/A"
}

pub fn count_unknown(summary: &StructuredSummary) -> usize {
    SummaryField::ALL
        .iter()
        .filter(|&&field| is_unresolved(summary.get(field)))
        .count()
}

/// Fields that would count against the gate, for diagnostics
pub fn unresolved_fields(summary: &StructuredSummary) -> Vec<SummaryField> {
    SummaryField::ALL
        .into_iter()
        .filter(|&field| is_unresolved(summary.get(field)))
        .collect()
}

/// Gate check. Passes when `unknown / total <= max_unknown_fraction`.
pub fn validate(summary: &StructuredSummary, max_unknown_fraction: f64) -> ValidationResult {
    let unknown_count = count_unknown(summary);
    let fraction = unknown_count as f64 / TOTAL_FIELDS as f64;

    ValidationResult {
        is_valid: fraction <= max_unknown_fraction,
        unknown_count,
        unknown_percentage: fraction * 100.0,
        total_fields: TOTAL_FIELDS,
    }
}
