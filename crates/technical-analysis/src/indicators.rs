use analysis_core::PriceBar;

pub const RSI_PERIOD: usize = 14;
pub const ATR_PERIOD: usize = 14;

/// RSI reported when there is not enough history to measure momentum
pub const NEUTRAL_RSI: f64 = 50.0;

/// Simple Moving Average, aligned with the input.
///
/// Index `i` is `None` until `period` values are available, then the mean of
/// the trailing `period` values ending at `i`.
pub fn sma(data: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; data.len()];
    if period == 0 || data.len() < period {
        return result;
    }

    for i in period - 1..data.len() {
        let sum: f64 = data[i + 1 - period..=i].iter().sum();
        result[i] = Some(sum / period as f64);
    }
    result
}

/// Relative Strength Index over the last `period` close-to-close changes.
///
/// Uses plain averages of gains and losses rather than Wilder smoothing.
pub fn rsi(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() < period + 1 {
        return NEUTRAL_RSI;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    for w in closes[closes.len() - period - 1..].windows(2) {
        let change = w[1] - w[0];
        if change > 0.0 {
            gains += change;
        } else {
            losses += change.abs();
        }
    }

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// True range of every bar after the first
pub fn true_ranges(bars: &[PriceBar]) -> Vec<f64> {
    bars.windows(2)
        .map(|w| {
            let high_low = w[1].high - w[1].low;
            let high_close = (w[1].high - w[0].close).abs();
            let low_close = (w[1].low - w[0].close).abs();
            high_low.max(high_close).max(low_close)
        })
        .collect()
}

/// Average True Range: SMA of the true-range series.
///
/// One element shorter than `bars`, since the first bar has no previous close.
pub fn atr(bars: &[PriceBar], period: usize) -> Vec<Option<f64>> {
    sma(&true_ranges(bars), period)
}

/// Latest value of an aligned indicator series, if defined
pub fn latest(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}

pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}
