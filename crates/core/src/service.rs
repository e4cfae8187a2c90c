use crate::domain::assessment::{DisplayReport, RiskAssessment};
use crate::domain::market::PriceSeries;
use crate::engine;
use crate::error::AnalysisError;
use crate::ingest::provider::MarketDataClient;
use crate::ingest::ticker::normalize_ticker;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_INVESTMENT_USD: f64 = 100.0;
pub const DEFAULT_TICKER: &str = "AAPL";

pub type AnalysisId = Uuid;

/// One completed analysis, as handed to a front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis_id: AnalysisId,
    pub provider: String,
    pub ticker: String,
    pub investment: f64,
    pub as_of_date: Option<NaiveDate>,
    pub assessment: RiskAssessment,
    pub display: DisplayReport,
}

/// The amount does not influence the score; it is validated and echoed back.
pub fn validate_investment(amount: f64) -> Result<f64, AnalysisError> {
    if !amount.is_finite() || amount < MIN_INVESTMENT_USD {
        return Err(AnalysisError::InvalidInvestment {
            min: MIN_INVESTMENT_USD,
            got: amount,
        });
    }
    Ok(amount)
}

/// Fetches market data for `ticker` and scores it.
///
/// Typed [`AnalysisError`]s are wrapped in the returned `anyhow::Error` so callers can
/// `downcast_ref` them; provider failures pass through as-is.
pub async fn analyze_ticker(
    client: &dyn MarketDataClient,
    ticker: &str,
    investment: f64,
) -> anyhow::Result<AnalysisReport> {
    let ticker = normalize_ticker(ticker)?;
    let investment = validate_investment(investment)?;
    let provider = client.provider_name();

    tracing::info!(%ticker, provider, "analysis started");

    let snapshot = client.fetch_market_snapshot(&ticker).await?;
    if snapshot.prices.is_empty() {
        tracing::warn!(%ticker, provider, "no historical prices returned");
        return Err(AnalysisError::InsufficientPriceData.into());
    }

    let series = PriceSeries::new(snapshot.prices)?;
    let assessment = engine::assess(&series, &snapshot.fundamentals)?;
    let display = assessment.display();

    tracing::info!(
        %ticker,
        provider,
        points = series.len(),
        overall = assessment.overall,
        tier = %assessment.tier,
        "analysis finished"
    );

    Ok(AnalysisReport {
        analysis_id: Uuid::new_v4(),
        provider: provider.to_string(),
        ticker,
        investment,
        as_of_date: series.last_date(),
        assessment,
        display,
    })
}
