use analysis_core::{AnalysisError, PriceBar, PriceSeries};
use tracing::debug;

/// Trading days folded into one weekly candle
pub const DEFAULT_BARS_PER_WEEK: usize = 5;

/// Aggregate daily bars into weekly bars.
///
/// Bars are grouped into consecutive chunks of `bars_per_week` in their
/// original order (the last chunk may be shorter), not by calendar week, so
/// holidays shift later weeks rather than producing short ones. Each chunk
/// produces one bar with:
/// - date = first bar's date
/// - open = first bar's open
/// - high = max high in the chunk
/// - low = min low in the chunk
/// - close = last bar's close
/// - volume = sum of all volumes
pub fn aggregate_to_weekly(
    daily: &PriceSeries,
    bars_per_week: usize,
) -> Result<PriceSeries, AnalysisError> {
    if bars_per_week == 0 {
        return Err(AnalysisError::InvalidData(
            "bars_per_week must be at least 1".to_string(),
        ));
    }

    let weekly: Vec<PriceBar> = daily
        .bars()
        .chunks(bars_per_week)
        .filter_map(make_weekly_bar)
        .collect();

    debug!(
        daily_bars = daily.len(),
        weekly_bars = weekly.len(),
        "Aggregated daily candles into weekly candles"
    );

    PriceSeries::weekly(weekly)
}

fn make_weekly_bar(bars: &[PriceBar]) -> Option<PriceBar> {
    let first = bars.first()?;
    let last = bars.last()?;

    let high = bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    let low = bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
    let volume: f64 = bars.iter().map(|b| b.volume).sum();

    Some(PriceBar {
        date: first.date,
        open: first.open,
        high,
        low,
        close: last.close,
        volume,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::Granularity;
    use chrono::{Duration, NaiveDate};

    fn daily_series(n: usize) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = (0..n)
            .map(|i| {
                let base = 100.0 + i as f64;
                PriceBar {
                    date: start + Duration::days(i as i64),
                    open: base,
                    high: base + 2.0 + (i % 3) as f64,
                    low: base - 1.0 - (i % 2) as f64,
                    close: base + 0.5,
                    volume: 1_000.0 * (i + 1) as f64,
                }
            })
            .collect();
        PriceSeries::daily(bars).unwrap()
    }

    #[test]
    fn test_ten_days_make_two_weeks() {
        let daily = daily_series(10);
        let weekly = aggregate_to_weekly(&daily, DEFAULT_BARS_PER_WEEK).unwrap();

        assert_eq!(weekly.granularity(), Granularity::Weekly);
        assert_eq!(weekly.len(), 2);

        for (week, chunk) in weekly.bars().iter().zip(daily.bars().chunks(5)) {
            let volume: f64 = chunk.iter().map(|b| b.volume).sum();
            let high = chunk.iter().map(|b| b.high).fold(f64::MIN, f64::max);
            let low = chunk.iter().map(|b| b.low).fold(f64::MAX, f64::min);

            assert_eq!(week.volume, volume);
            assert_eq!(week.high, high);
            assert_eq!(week.low, low);
            assert_eq!(week.open, chunk[0].open);
            assert_eq!(week.close, chunk[4].close);
            assert_eq!(week.date, chunk[0].date);
        }
        // 1..=5 and 6..=10 thousand
        assert_eq!(weekly.bars()[0].volume, 15_000.0);
        assert_eq!(weekly.bars()[1].volume, 40_000.0);
    }

    #[test]
    fn test_trailing_partial_week() {
        let daily = daily_series(12);
        let weekly = aggregate_to_weekly(&daily, DEFAULT_BARS_PER_WEEK).unwrap();

        assert_eq!(weekly.len(), 3);
        let last = &weekly.bars()[2];
        assert_eq!(last.date, daily.bars()[10].date);
        assert_eq!(last.close, daily.bars()[11].close);
        assert_eq!(last.volume, 11_000.0 + 12_000.0);
    }

    #[test]
    fn test_order_preserved() {
        let weekly = aggregate_to_weekly(&daily_series(53), DEFAULT_BARS_PER_WEEK).unwrap();
        assert!(weekly.bars().windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_zero_chunk_rejected() {
        assert!(matches!(
            aggregate_to_weekly(&daily_series(5), 0),
            Err(AnalysisError::InvalidData(_))
        ));
    }
}
