//! Risk-scoring engine: `(PriceSeries, FundamentalsSnapshot) -> RiskAssessment`.
//!
//! Pure and synchronous. All tables are statics in [`registry`].

pub mod extract;
pub mod normalize;
pub mod registry;

use crate::domain::assessment::{DisplayBucket, IndicatorScore, RiskAssessment, RiskTier};
use crate::domain::market::{FundamentalsSnapshot, PriceSeries};
use crate::error::AnalysisError;
use registry::{Signals, INDICATORS};

pub fn assess(
    series: &PriceSeries,
    fundamentals: &FundamentalsSnapshot,
) -> Result<RiskAssessment, AnalysisError> {
    if series.is_empty() {
        return Err(AnalysisError::InsufficientPriceData);
    }

    let closes: Vec<f64> = series.closes().collect();
    let signals = Signals {
        volatility: extract::volatility(&closes),
        max_drawdown: extract::max_drawdown(&closes),
        fundamentals,
    };

    let mut overall = 0.0;
    let mut indicators = Vec::with_capacity(INDICATORS.len());
    for indicator in &INDICATORS {
        let (score, used_fallback) = indicator.score(&signals);
        if !(0.0..=100.0).contains(&score) {
            // Left as-is: only margin and yield are floored.
            tracing::warn!(
                indicator = indicator.key,
                score,
                "sub-score outside 0..=100; aggregating unmodified"
            );
        }

        overall += indicator.weight * score;
        indicators.push(IndicatorScore {
            key: indicator.key.to_string(),
            label: indicator.label.to_string(),
            weight: indicator.weight,
            score,
            used_fallback,
        });
    }

    tracing::debug!(
        points = series.len(),
        volatility = signals.volatility,
        max_drawdown = signals.max_drawdown,
        overall,
        "risk assessment computed"
    );

    Ok(RiskAssessment {
        overall,
        tier: RiskTier::classify(overall),
        bucket: DisplayBucket::classify(overall),
        indicators,
    })
}
