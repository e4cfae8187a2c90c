use crate::config::Settings;
use crate::ingest::types::MarketSnapshot;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use std::future::Future;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PATH: &str = "/v1/market_snapshot";
const DEFAULT_RETRIES: u32 = 3;
const HISTORY_RANGE: &str = "1y";

#[async_trait::async_trait]
pub trait MarketDataClient: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Trailing one-year daily closes plus fundamentals for `ticker`.
    async fn fetch_market_snapshot(&self, ticker: &str) -> Result<MarketSnapshot>;
}

#[derive(Debug, Clone)]
pub struct HttpJsonMarketData {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    path: String,
    retries: u32,
}

impl HttpJsonMarketData {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings.require_data_provider_base_url()?.to_string();
        let api_key = settings.data_provider_api_key.clone();

        let timeout_secs = std::env::var("DATA_PROVIDER_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let retries = parse_retries(std::env::var("DATA_PROVIDER_RETRIES").ok().as_deref());

        let path = std::env::var("DATA_PROVIDER_SNAPSHOT_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PATH.to_string());

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build market data http client")?;

        Ok(Self {
            http,
            base_url,
            api_key,
            path,
            retries,
        })
    }

    fn url(&self) -> String {
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };

        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &self.api_key {
            headers.insert("x-api-key", HeaderValue::from_str(api_key)?);
        }
        Ok(headers)
    }

    async fn fetch_once(&self, ticker: &str) -> Result<MarketSnapshot> {
        let res = self
            .http
            .get(self.url())
            .headers(self.headers()?)
            .query(&[("ticker", ticker), ("range", HISTORY_RANGE)])
            .send()
            .await
            .context("market data request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read market data response")?;

        if !status.is_success() {
            anyhow::bail!("market data HTTP {status}: {text}");
        }

        parse_snapshot(&text)
    }
}

#[async_trait::async_trait]
impl MarketDataClient for HttpJsonMarketData {
    fn provider_name(&self) -> &'static str {
        "external_http_json"
    }

    async fn fetch_market_snapshot(&self, ticker: &str) -> Result<MarketSnapshot> {
        let parsed = with_retries(self.retries, ticker, || self.fetch_once(ticker)).await?;
        validate(&parsed, ticker)?;
        Ok(parsed)
    }
}

/// Unset or unparsable falls back to the default; at least one attempt is always made.
fn parse_retries(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(DEFAULT_RETRIES)
        .max(1)
}

/// Runs `op` up to `retries` times, sleeping 1s, 2s, 4s, ... between failed attempts.
async fn with_retries<T, F, Fut>(retries: u32, ticker: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= retries {
                    return Err(err);
                }
                let backoff = Duration::from_secs(1 << (attempt - 1));
                tracing::warn!(attempt, %ticker, ?backoff, error = %err, "market data fetch failed; retrying");
                tokio::time::sleep(backoff).await;
            }
        }
    }
}

fn parse_snapshot(text: &str) -> Result<MarketSnapshot> {
    serde_json::from_str::<MarketSnapshot>(text)
        .with_context(|| format!("failed to parse market data response into MarketSnapshot: {text}"))
}

fn validate(snapshot: &MarketSnapshot, requested: &str) -> Result<()> {
    anyhow::ensure!(
        snapshot.ticker.trim().eq_ignore_ascii_case(requested),
        "market data ticker mismatch: requested {requested}, got {}",
        snapshot.ticker
    );
    Ok(())
}
