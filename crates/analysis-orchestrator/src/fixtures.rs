//! Synthetic daily series shared by the pipeline and service tests.

use analysis_core::{PriceBar, PriceSeries};
use chrono::{Duration, NaiveDate};

/// Bars whose open is the previous close, with a fixed 0.2 wick and equal volume
pub fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
    let start = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                date: start + Duration::days(i as i64),
                open,
                high: open.max(close) + 0.2,
                low: open.min(close) - 0.2,
                close,
                volume: 1_000_000.0,
            }
        })
        .collect()
}

/// Alternating up/down steps starting at 100, beginning with `up`
pub fn zigzag(n: usize, up: f64, down: f64) -> Vec<f64> {
    let mut price = 100.0;
    let mut closes = Vec::with_capacity(n);
    for i in 0..n {
        if i > 0 {
            price += if i % 2 == 1 { up } else { -down };
        }
        closes.push(price);
    }
    closes
}

pub fn series(closes: &[f64]) -> PriceSeries {
    PriceSeries::daily(bars_from_closes(closes)).unwrap()
}
