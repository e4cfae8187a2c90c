use crate::error::AnalysisError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Daily closes for one ticker, ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series, rejecting non-positive or non-finite closes and out-of-order dates.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, AnalysisError> {
        for (index, point) in points.iter().enumerate() {
            if !point.close.is_finite() || point.close <= 0.0 {
                return Err(AnalysisError::InvalidPriceData {
                    index,
                    reason: format!("close must be positive and finite (got {})", point.close),
                });
            }
            if index > 0 && points[index - 1].date >= point.date {
                return Err(AnalysisError::InvalidPriceData {
                    index,
                    reason: format!(
                        "dates must be strictly ascending ({} follows {})",
                        point.date,
                        points[index - 1].date
                    ),
                });
            }
        }

        Ok(Self { points })
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.close)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

/// Point-in-time fundamentals for one ticker. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundamentalsSnapshot {
    #[serde(default)]
    pub beta: Option<f64>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub debt_to_equity: Option<f64>,
    #[serde(default)]
    pub operating_margins: Option<f64>,
    #[serde(default)]
    pub dividend_yield: Option<f64>,
    #[serde(default, rename = "priceToSalesTrailing12Months")]
    pub price_to_sales: Option<f64>,
    #[serde(default, rename = "forwardPE")]
    pub forward_pe: Option<f64>,
}
