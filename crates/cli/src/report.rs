use riskscope_core::domain::assessment::DisplayBucket;
use riskscope_core::service::AnalysisReport;
use std::fmt::{self, Write};

const TITLE: &str = "Investment Risk Analyzer";

/// Plain-text report: header, overall risk, and the per-indicator breakdown.
pub fn render(analysis: &AnalysisReport) -> Result<String, fmt::Error> {
    let display = &analysis.display;
    let mut out = String::new();

    writeln!(out, "{TITLE}")?;
    writeln!(out, "{}", "=".repeat(TITLE.len()))?;
    writeln!(
        out,
        "Ticker: {}    Investment: ${:.2}",
        analysis.ticker, analysis.investment
    )?;
    if let Some(as_of) = analysis.as_of_date {
        writeln!(out, "Prices as of: {as_of}")?;
    }
    writeln!(out)?;

    writeln!(out, "Overall Risk: {:.1}%", display.overall_pct)?;
    writeln!(
        out,
        "Risk Level: {} ({})",
        display.tier,
        bucket_word(analysis.assessment.bucket)
    )?;
    writeln!(out)?;

    let width = display
        .breakdown
        .iter()
        .map(|row| row.indicator.len())
        .max()
        .unwrap_or(0)
        .max("Indicator".len());

    writeln!(out, "Breakdown by Indicator")?;
    writeln!(out, "{:<width$}  {:>5}", "Indicator", "Score")?;
    writeln!(out, "{}  {}", "-".repeat(width), "-".repeat(5))?;
    for row in &display.breakdown {
        writeln!(out, "{:<width$}  {:>5}", row.indicator, row.score)?;
    }

    Ok(out)
}

fn bucket_word(bucket: DisplayBucket) -> &'static str {
    match bucket {
        DisplayBucket::Favorable => "favorable",
        DisplayBucket::Neutral => "neutral",
        DisplayBucket::Unfavorable => "unfavorable",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskscope_core::domain::market::{FundamentalsSnapshot, PricePoint, PriceSeries};
    use riskscope_core::engine;
    use riskscope_core::service::AnalysisId;

    fn sample() -> AnalysisReport {
        let start = chrono::NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let series = PriceSeries::new(
            (0..5)
                .map(|i| PricePoint {
                    date: start + chrono::Duration::days(i),
                    close: 100.0,
                })
                .collect(),
        )
        .unwrap();
        let fundamentals = FundamentalsSnapshot {
            beta: Some(1.0),
            sector: Some("Utilities".to_string()),
            debt_to_equity: Some(40.0),
            operating_margins: Some(0.20),
            dividend_yield: Some(0.02),
            price_to_sales: Some(2.0),
            forward_pe: Some(15.0),
        };
        let assessment = engine::assess(&series, &fundamentals).unwrap();
        let display = assessment.display();

        AnalysisReport {
            analysis_id: AnalysisId::nil(),
            provider: "test".to_string(),
            ticker: "DUK".to_string(),
            investment: 1_000.0,
            as_of_date: series.last_date(),
            assessment,
            display,
        }
    }

    #[test]
    fn renders_overall_and_breakdown() {
        let text = render(&sample()).unwrap();
        assert!(text.starts_with("Investment Risk Analyzer\n"));
        assert!(text.contains("Ticker: DUK    Investment: $1000.00"));
        assert!(text.contains("Prices as of: 2026-03-06"));
        assert!(text.contains("Overall Risk: 22.2%"));
        assert!(text.contains("Risk Level: Low (favorable)"));
        assert!(text.contains("Debt to Equity        8"));
        assert!(text.contains("Forward P/E          45"));
    }

    #[test]
    fn breakdown_keeps_registry_order() {
        let text = render(&sample()).unwrap();
        let vol = text.find("Volatility").unwrap();
        let sector = text.find("Sector Risk").unwrap();
        let pe = text.find("Forward P/E").unwrap();
        assert!(vol < sector && sector < pe);
    }
}
