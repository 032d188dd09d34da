use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Insufficient data: need at least {required} bars, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error(
        "Insufficient data for interpretation: {unknown_count} of {total} fields unknown ({pct:.1}%)",
        pct = unknown_percentage(.unknown_count, .total)
    )]
    ValidationFailure { unknown_count: usize, total: usize },

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("API error: {0}")]
    ApiError(String),
}

fn unknown_percentage(unknown_count: &usize, total: &usize) -> f64 {
    if *total == 0 {
        return 0.0;
    }
    *unknown_count as f64 / *total as f64 * 100.0
}
