use crate::domain::market::{FundamentalsSnapshot, PricePoint};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub ticker: String,
    pub prices: Vec<PricePoint>,
    #[serde(default)]
    pub fundamentals: FundamentalsSnapshot,
}
