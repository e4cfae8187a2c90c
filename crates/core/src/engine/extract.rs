//! Raw statistics derived from a close-price sequence.

/// `r[i] = c[i] / c[i-1] - 1`. Empty when there are fewer than two closes.
pub fn daily_returns(closes: &[f64]) -> Vec<f64> {
    closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// Population standard deviation of daily returns; 0 when there are no returns.
pub fn volatility(closes: &[f64]) -> f64 {
    let returns = daily_returns(closes);
    if returns.is_empty() {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Most negative drawdown from the running maximum (always <= 0).
pub fn max_drawdown(closes: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for &close in closes {
        peak = peak.max(close);
        let dd = (close - peak) / peak;
        worst = worst.min(dd);
    }
    worst
}
