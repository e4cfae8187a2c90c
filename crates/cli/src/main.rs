use anyhow::Context;
use clap::Parser;
use riskscope_core::error::AnalysisError;
use riskscope_core::ingest::provider::HttpJsonMarketData;
use riskscope_core::service::{self, DEFAULT_TICKER, MIN_INVESTMENT_USD};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod report;

#[derive(Debug, Parser)]
#[command(name = "riskscope", about = "Investment Risk Analyzer")]
struct Args {
    /// Stock ticker (e.g. AAPL, MSFT, TSLA).
    #[arg(long, default_value = DEFAULT_TICKER)]
    ticker: String,

    /// Investment amount in USD (minimum 100).
    #[arg(long, default_value_t = MIN_INVESTMENT_USD)]
    investment: f64,

    /// Print the full analysis as JSON instead of the text report.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = riskscope_core::config::Settings::from_env()?;
    let sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let market_data = HttpJsonMarketData::from_settings(&settings)?;

    match service::analyze_ticker(&market_data, &args.ticker, args.investment).await {
        Ok(analysis) => {
            if args.json {
                let out = serde_json::to_string_pretty(&analysis)
                    .context("failed to serialize analysis")?;
                println!("{out}");
            } else {
                let text = report::render(&analysis).context("failed to render report")?;
                print!("{text}");
            }
            Ok(())
        }
        Err(err) => {
            let message = match err.downcast_ref::<AnalysisError>() {
                Some(analysis) => analysis.user_message(),
                None => {
                    sentry_anyhow::capture_anyhow(&err);
                    format!("An error occurred: {err}")
                }
            };
            tracing::error!(ticker = %args.ticker, error = %format!("{err:#}"), "analysis failed");
            eprintln!("{message}");
            drop(sentry_guard);
            std::process::exit(1);
        }
    }
}

fn init_sentry(settings: &riskscope_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
