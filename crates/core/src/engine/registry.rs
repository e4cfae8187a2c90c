//! Indicator registry: every scored indicator, in breakdown order, with its input, normalizer,
//! fallback and weight. Aggregation only iterates this table.

use crate::domain::market::FundamentalsSnapshot;
use crate::engine::normalize;

pub const UNKNOWN_SECTOR: &str = "Unknown";
pub const UNKNOWN_SECTOR_RISK: f64 = 50.0;

/// Flat concentration score; no position data feeds it.
pub const CONCENTRATION_SCORE: f64 = 80.0;

pub static SECTOR_RISK: [(&str, f64); 12] = [
    ("Technology", 60.0),
    ("Energy", 80.0),
    ("Healthcare", 40.0),
    ("Financial Services", 55.0),
    ("Industrials", 65.0),
    ("Consumer Defensive", 35.0),
    ("Utilities", 30.0),
    ("Communication Services", 50.0),
    ("Consumer Cyclical", 70.0),
    ("Basic Materials", 60.0),
    ("Real Estate", 70.0),
    (UNKNOWN_SECTOR, UNKNOWN_SECTOR_RISK),
];

/// Exact-match lookup. Unrecognized sectors return `None`.
pub fn sector_base_risk(sector: &str) -> Option<f64> {
    SECTOR_RISK
        .iter()
        .find(|(name, _)| *name == sector)
        .map(|(_, risk)| *risk)
}

/// Everything an indicator may read.
#[derive(Debug, Clone, Copy)]
pub struct Signals<'a> {
    pub volatility: f64,
    pub max_drawdown: f64,
    pub fundamentals: &'a FundamentalsSnapshot,
}

pub struct Indicator {
    pub key: &'static str,
    pub label: &'static str,
    pub weight: f64,
    pub extract: fn(&Signals<'_>) -> Option<f64>,
    pub normalize: fn(f64) -> Option<f64>,
    pub fallback: f64,
}

impl Indicator {
    /// Returns the sub-score and whether the fallback was substituted.
    pub fn score(&self, signals: &Signals<'_>) -> (f64, bool) {
        match (self.extract)(signals).and_then(self.normalize) {
            Some(score) => (score, false),
            None => (self.fallback, true),
        }
    }
}

pub static INDICATORS: [Indicator; 10] = [
    Indicator {
        key: "volatility",
        label: "Volatility",
        weight: 0.25,
        extract: price_volatility,
        normalize: normalize::volatility,
        fallback: 0.0,
    },
    Indicator {
        key: "max_drawdown",
        label: "Max Drawdown",
        weight: 0.10,
        extract: price_max_drawdown,
        normalize: normalize::max_drawdown,
        fallback: 0.0,
    },
    Indicator {
        key: "beta",
        label: "Beta",
        weight: 0.05,
        extract: beta,
        normalize: normalize::beta,
        fallback: 70.0,
    },
    Indicator {
        key: "sector",
        label: "Sector Risk",
        weight: 0.05,
        extract: sector,
        normalize: normalize::passthrough,
        fallback: UNKNOWN_SECTOR_RISK,
    },
    Indicator {
        key: "concentration",
        label: "Concentration",
        weight: 0.05,
        extract: no_input,
        normalize: normalize::passthrough,
        fallback: CONCENTRATION_SCORE,
    },
    Indicator {
        key: "debt_to_equity",
        label: "Debt to Equity",
        weight: 0.20,
        extract: debt_to_equity,
        normalize: normalize::debt_to_equity,
        fallback: 70.0,
    },
    Indicator {
        key: "operating_margin",
        label: "Operating Margin",
        weight: 0.10,
        extract: operating_margins,
        normalize: normalize::operating_margin,
        fallback: 70.0,
    },
    Indicator {
        key: "dividend_yield",
        label: "Dividend Yield",
        weight: 0.03,
        extract: dividend_yield,
        normalize: normalize::dividend_yield,
        fallback: 70.0,
    },
    Indicator {
        key: "ps_ratio",
        label: "P/S Ratio",
        weight: 0.10,
        extract: price_to_sales,
        normalize: normalize::price_to_sales,
        fallback: 70.0,
    },
    Indicator {
        key: "forward_pe",
        label: "Forward P/E",
        weight: 0.07,
        extract: forward_pe,
        normalize: normalize::forward_pe,
        fallback: 90.0,
    },
];

fn price_volatility(s: &Signals<'_>) -> Option<f64> {
    Some(s.volatility)
}

fn price_max_drawdown(s: &Signals<'_>) -> Option<f64> {
    Some(s.max_drawdown)
}

fn beta(s: &Signals<'_>) -> Option<f64> {
    s.fundamentals.beta
}

fn sector(s: &Signals<'_>) -> Option<f64> {
    s.fundamentals.sector.as_deref().and_then(sector_base_risk)
}

fn no_input(_: &Signals<'_>) -> Option<f64> {
    None
}

fn debt_to_equity(s: &Signals<'_>) -> Option<f64> {
    s.fundamentals.debt_to_equity
}

fn operating_margins(s: &Signals<'_>) -> Option<f64> {
    s.fundamentals.operating_margins
}

fn dividend_yield(s: &Signals<'_>) -> Option<f64> {
    s.fundamentals.dividend_yield
}

fn price_to_sales(s: &Signals<'_>) -> Option<f64> {
    s.fundamentals.price_to_sales
}

fn forward_pe(s: &Signals<'_>) -> Option<f64> {
    s.fundamentals.forward_pe
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn signals(f: &FundamentalsSnapshot) -> Signals<'_> {
        Signals {
            volatility: 0.0,
            max_drawdown: 0.0,
            fundamentals: f,
        }
    }

    fn score_of(key: &str, f: &FundamentalsSnapshot) -> (f64, bool) {
        INDICATORS
            .iter()
            .find(|i| i.key == key)
            .unwrap()
            .score(&signals(f))
    }

    #[test]
    fn weights_sum_to_one() {
        let total: f64 = INDICATORS.iter().map(|i| i.weight).sum();
        assert!((total - 1.0).abs() < 1e-9, "total={total}");
    }

    #[test]
    fn breakdown_order_is_stable() {
        let labels: Vec<_> = INDICATORS.iter().map(|i| i.label).collect();
        assert_eq!(
            labels,
            [
                "Volatility",
                "Max Drawdown",
                "Beta",
                "Sector Risk",
                "Concentration",
                "Debt to Equity",
                "Operating Margin",
                "Dividend Yield",
                "P/S Ratio",
                "Forward P/E",
            ]
        );
        let keys: BTreeSet<_> = INDICATORS.iter().map(|i| i.key).collect();
        assert_eq!(keys.len(), INDICATORS.len());
    }

    #[test]
    fn sector_table_has_unknown_entry() {
        assert_eq!(sector_base_risk(UNKNOWN_SECTOR), Some(UNKNOWN_SECTOR_RISK));
        assert_eq!(sector_base_risk("Energy"), Some(80.0));
        assert_eq!(sector_base_risk("Utilities"), Some(30.0));
        assert_eq!(sector_base_risk("utilities"), None);
    }

    #[test]
    fn unknown_or_missing_sector_scores_fifty() {
        let missing = FundamentalsSnapshot::default();
        assert_eq!(score_of("sector", &missing), (50.0, true));

        let odd = FundamentalsSnapshot {
            sector: Some("Shipping & Stuff".to_string()),
            ..Default::default()
        };
        assert_eq!(score_of("sector", &odd), (50.0, true));

        let energy = FundamentalsSnapshot {
            sector: Some("Energy".to_string()),
            ..Default::default()
        };
        assert_eq!(score_of("sector", &energy), (80.0, false));
    }

    #[test]
    fn fallbacks_apply_to_absent_fields() {
        let f = FundamentalsSnapshot::default();
        assert_eq!(score_of("beta", &f), (70.0, true));
        assert_eq!(score_of("concentration", &f), (80.0, true));
        assert_eq!(score_of("debt_to_equity", &f), (70.0, true));
        assert_eq!(score_of("operating_margin", &f), (70.0, true));
        assert_eq!(score_of("dividend_yield", &f), (70.0, true));
        assert_eq!(score_of("ps_ratio", &f), (70.0, true));
        assert_eq!(score_of("forward_pe", &f), (90.0, true));
    }

    #[test]
    fn fallbacks_apply_to_excluded_values() {
        let f = FundamentalsSnapshot {
            debt_to_equity: Some(-5.0),
            forward_pe: Some(-1.0),
            ..Default::default()
        };
        assert_eq!(score_of("debt_to_equity", &f), (70.0, true));
        assert_eq!(score_of("forward_pe", &f), (90.0, true));

        let f = FundamentalsSnapshot {
            debt_to_equity: Some(50.0),
            ..Default::default()
        };
        assert_eq!(score_of("debt_to_equity", &f), (10.0, false));
    }
}
