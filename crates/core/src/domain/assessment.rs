use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl RiskTier {
    /// Inclusive upper bounds at 20/40/60/80, first match wins.
    pub fn classify(overall: f64) -> Self {
        if overall <= 20.0 {
            RiskTier::VeryLow
        } else if overall <= 40.0 {
            RiskTier::Low
        } else if overall <= 60.0 {
            RiskTier::Moderate
        } else if overall <= 80.0 {
            RiskTier::High
        } else {
            RiskTier::VeryHigh
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskTier::VeryLow => "Very Low",
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
            RiskTier::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Presentation color bucket. Independent of [`RiskTier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayBucket {
    Favorable,
    Neutral,
    Unfavorable,
}

impl DisplayBucket {
    pub fn classify(overall: f64) -> Self {
        if overall <= 40.0 {
            DisplayBucket::Favorable
        } else if overall <= 80.0 {
            DisplayBucket::Neutral
        } else {
            DisplayBucket::Unfavorable
        }
    }

    pub fn color_hex(self) -> &'static str {
        match self {
            DisplayBucket::Favorable => "#d4edda",
            DisplayBucket::Neutral => "#fff3cd",
            DisplayBucket::Unfavorable => "#f8d7da",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorScore {
    pub key: String,
    pub label: String,
    pub weight: f64,
    pub score: f64,
    pub used_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub overall: f64,
    pub tier: RiskTier,
    pub bucket: DisplayBucket,
    pub indicators: Vec<IndicatorScore>,
}

/// Rounded view of a [`RiskAssessment`] for rendering. Aggregation never reads these values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayReport {
    pub overall_pct: f64,
    pub tier: String,
    pub color: String,
    pub breakdown: Vec<BreakdownRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub indicator: String,
    pub score: i64,
}

impl RiskAssessment {
    pub fn display(&self) -> DisplayReport {
        DisplayReport {
            overall_pct: round_to_tenth(self.overall),
            tier: self.tier.label().to_string(),
            color: self.bucket.color_hex().to_string(),
            breakdown: self
                .indicators
                .iter()
                .map(|ind| BreakdownRow {
                    indicator: ind.label.clone(),
                    score: round_to_int(ind.score),
                })
                .collect(),
        }
    }
}

// Rounds the exact decimal value of `v`, ties to even: 22.25 shows as 22.2, 0.15 as 0.1.
pub fn round_to_tenth(v: f64) -> f64 {
    format!("{v:.1}").parse().unwrap_or(v)
}

pub fn round_to_int(v: f64) -> i64 {
    v.round_ties_even() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_upper_bounds_are_inclusive() {
        assert_eq!(RiskTier::classify(20.0), RiskTier::VeryLow);
        assert_eq!(RiskTier::classify(20.01), RiskTier::Low);
        assert_eq!(RiskTier::classify(40.0), RiskTier::Low);
        assert_eq!(RiskTier::classify(60.0), RiskTier::Moderate);
        assert_eq!(RiskTier::classify(80.0), RiskTier::High);
        assert_eq!(RiskTier::classify(80.01), RiskTier::VeryHigh);
        assert_eq!(RiskTier::classify(-3.0), RiskTier::VeryLow);
    }

    #[test]
    fn bucket_is_independent_of_tier() {
        assert_eq!(DisplayBucket::classify(40.0), DisplayBucket::Favorable);
        assert_eq!(DisplayBucket::classify(40.5), DisplayBucket::Neutral);
        assert_eq!(DisplayBucket::classify(80.0), DisplayBucket::Neutral);
        assert_eq!(DisplayBucket::classify(80.01), DisplayBucket::Unfavorable);
        assert_eq!(DisplayBucket::Unfavorable.color_hex(), "#f8d7da");
    }

    #[test]
    fn rounding_is_half_to_even() {
        assert_eq!(round_to_tenth(22.25), 22.2);
        assert_eq!(round_to_tenth(22.26), 22.3);
        assert_eq!(round_to_int(50.5), 50);
        assert_eq!(round_to_int(7.5), 8);
        assert_eq!(round_to_int(8.0), 8);
    }

    #[test]
    fn tenth_rounding_uses_exact_decimal_value() {
        // Each literal sits just off a .x5 tie once stored as f64.
        assert_eq!(round_to_tenth(22.05), 22.1);
        assert_eq!(round_to_tenth(0.15), 0.1);
        assert_eq!(round_to_tenth(1.15), 1.1);
        assert_eq!(round_to_tenth(40.05), 40.0);
        assert_eq!(round_to_tenth(-0.04), -0.0);
    }

    #[test]
    fn tier_serializes_with_display_label() {
        let v = serde_json::to_value(RiskTier::VeryHigh).unwrap();
        assert_eq!(v, serde_json::json!("Very High"));
    }
}
