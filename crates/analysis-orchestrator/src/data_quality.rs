use analysis_core::PriceSeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Calendar days between bars above which a gap is reported.
/// A normal Friday-to-Monday weekend is 3.
pub const DEFAULT_MAX_GAP_DAYS: i64 = 4;

const MAX_WARNINGS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataWarning {
    pub date: NaiveDate,
    pub warning_type: String,
    pub message: String,
}

/// Advisory only; nothing in here blocks an analysis
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityReport {
    pub total_bars: usize,
    pub gap_count: usize,
    pub zero_volume_bars: usize,
    pub warnings: Vec<DataWarning>,
}

impl DataQualityReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Scan a daily series for calendar gaps and zero-volume bars.
pub fn check_data_quality(series: &PriceSeries, max_gap_days: i64) -> DataQualityReport {
    let bars = series.bars();
    let mut report = DataQualityReport {
        total_bars: bars.len(),
        ..Default::default()
    };

    for (i, bar) in bars.iter().enumerate() {
        if bar.volume <= 0.0 {
            report.zero_volume_bars += 1;
            report.warnings.push(DataWarning {
                date: bar.date,
                warning_type: "zero_volume".to_string(),
                message: "Bar has zero volume".to_string(),
            });
        }

        if i > 0 {
            let prev = bars[i - 1].date;
            let gap = (bar.date - prev).num_days();
            if gap > max_gap_days {
                report.gap_count += 1;
                report.warnings.push(DataWarning {
                    date: bar.date,
                    warning_type: "date_gap".to_string(),
                    message: format!("{gap}-day gap between {prev} and {}", bar.date),
                });
            }
        }
    }

    if !report.is_clean() {
        warn!(
            bars = report.total_bars,
            gaps = report.gap_count,
            zero_volume = report.zero_volume_bars,
            "Data quality issues in daily series"
        );
    }

    report.warnings.truncate(MAX_WARNINGS);
    report
}
