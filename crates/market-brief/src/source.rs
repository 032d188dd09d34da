use std::path::PathBuf;

use analysis_core::{AnalysisError, MarketDataSource, PriceBar};
use async_trait::async_trait;
use chrono::Duration;
use tracing::debug;

/// Daily bars from a JSON array on disk.
///
/// Each element is `{"date": "YYYY-MM-DD", "open", "high", "low", "close", "volume"}`.
/// The file may hold any symbol and any order; bars are sorted and trimmed to
/// the lookback window ending at the newest bar.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MarketDataSource for JsonFileSource {
    async fn fetch_daily(&self, symbol: &str, lookback_days: u32) -> Result<Vec<PriceBar>, AnalysisError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AnalysisError::ApiError(format!("cannot read {}: {e}", self.path.display()))
        })?;

        let mut bars: Vec<PriceBar> = serde_json::from_str(&raw).map_err(|e| {
            AnalysisError::InvalidData(format!("{} is not a JSON array of bars: {e}", self.path.display()))
        })?;
        bars.sort_by_key(|b| b.date);

        // A lookback reaching past the earliest representable date keeps everything
        let cutoff = bars
            .last()
            .and_then(|b| b.date.checked_sub_signed(Duration::days(i64::from(lookback_days))));
        if let Some(cutoff) = cutoff {
            bars.retain(|b| b.date > cutoff);
        }

        debug!(symbol, path = %self.path.display(), bars = bars.len(), "Loaded bars from file");
        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("market-brief-{}-{name}.json", std::process::id()));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[tokio::test]
    async fn test_sorts_and_trims_to_lookback() {
        let path = write_fixture(
            "lookback",
            r#"[
                {"date": "2024-03-10", "open": 3, "high": 4, "low": 2, "close": 3.5, "volume": 10},
                {"date": "2024-01-01", "open": 1, "high": 2, "low": 0.5, "close": 1.5, "volume": 10},
                {"date": "2024-03-01", "open": 2, "high": 3, "low": 1, "close": 2.5, "volume": 10}
            ]"#,
        );

        let bars = JsonFileSource::new(&path).fetch_daily("SPY", 30).await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(bars.len(), 2);
        assert!(bars[0].date < bars[1].date);
        assert_eq!(bars[1].close, 3.5);
    }

    #[tokio::test]
    async fn test_huge_lookback_keeps_every_bar() {
        let path = write_fixture(
            "huge-lookback",
            r#"[
                {"date": "2024-03-01", "open": 2, "high": 3, "low": 1, "close": 2.5, "volume": 10},
                {"date": "1990-01-02", "open": 1, "high": 2, "low": 0.5, "close": 1.5, "volume": 10}
            ]"#,
        );

        let result = JsonFileSource::new(&path).fetch_daily("SPY", u32::MAX).await;
        std::fs::remove_file(&path).ok();

        let bars = result.unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 1.5);
    }

    #[tokio::test]
    async fn test_missing_file_is_api_error() {
        let source = JsonFileSource::new("/definitely/not/here.json");
        assert!(matches!(
            source.fetch_daily("SPY", 180).await,
            Err(AnalysisError::ApiError(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid_data() {
        let path = write_fixture("malformed", r#"{"not": "an array"}"#);
        let result = JsonFileSource::new(&path).fetch_daily("SPY", 180).await;
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(AnalysisError::InvalidData(_))));
    }
}
