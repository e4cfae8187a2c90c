//! Raw indicator value -> 0..=100 risk sub-score.
//!
//! Each normalizer returns `None` when the input is outside the domain the formula accepts;
//! the registry then substitutes the indicator's fallback. Only operating margin and dividend
//! yield are floored at 0. The others are capped at 100 and otherwise left unfloored.

pub fn volatility(sigma: f64) -> Option<f64> {
    Some((sigma * 1000.0).min(100.0))
}

pub fn max_drawdown(max_dd: f64) -> Option<f64> {
    Some((max_dd.abs() * 100.0).min(100.0))
}

pub fn beta(beta: f64) -> Option<f64> {
    Some((beta.abs() * 50.0).min(100.0))
}

/// Negative debt-to-equity is treated as missing.
pub fn debt_to_equity(dte: f64) -> Option<f64> {
    (dte >= 0.0).then(|| (dte * 0.2).min(100.0))
}

pub fn operating_margin(margin: f64) -> Option<f64> {
    Some((100.0 - margin * 200.0).clamp(0.0, 100.0))
}

pub fn dividend_yield(yield_: f64) -> Option<f64> {
    Some((70.0 - yield_ * 1000.0).clamp(0.0, 100.0))
}

pub fn price_to_sales(ps: f64) -> Option<f64> {
    Some((ps * 10.0).min(100.0))
}

/// Non-positive forward P/E is treated as missing.
pub fn forward_pe(pe: f64) -> Option<f64> {
    (pe > 0.0).then(|| (pe * 3.0).min(100.0))
}

/// Identity for inputs that are already sub-scores (sector base risk, constants).
pub fn passthrough(score: f64) -> Option<f64> {
    Some(score)
}
