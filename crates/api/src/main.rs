use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use riskscope_core::error::AnalysisError;
use riskscope_core::ingest::provider::{HttpJsonMarketData, MarketDataClient};
use riskscope_core::service::{self, AnalysisReport, MIN_INVESTMENT_USD};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = riskscope_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let market_data: Option<Arc<dyn MarketDataClient>> =
        match HttpJsonMarketData::from_settings(&settings) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                sentry_anyhow::capture_anyhow(&e);
                tracing::error!(error = %e, "market data provider unavailable; starting API in degraded mode");
                None
            }
        };

    let app = router(AppState { market_data });

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/analyze/:ticker", get(analyze))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    market_data: Option<Arc<dyn MarketDataClient>>,
}

#[derive(Debug, Deserialize)]
struct AnalyzeQuery {
    investment: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ApiErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        let status = match err.downcast_ref::<AnalysisError>() {
            Some(AnalysisError::InvalidTicker(_)) | Some(AnalysisError::InvalidInvestment { .. }) => {
                StatusCode::BAD_REQUEST
            }
            Some(AnalysisError::InsufficientPriceData) => StatusCode::UNPROCESSABLE_ENTITY,
            Some(AnalysisError::InvalidPriceData { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            None => StatusCode::BAD_GATEWAY,
        };

        let message = match err.downcast_ref::<AnalysisError>() {
            Some(analysis) => analysis.user_message(),
            None => format!("An error occurred: {err}"),
        };

        if status.is_server_error() {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(%status, error = %format!("{err:#}"), "analysis failed");
        } else {
            tracing::info!(%status, error = %err, "analysis rejected");
        }

        ApiError { status, message }
    }
}

async fn analyze(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    Query(query): Query<AnalyzeQuery>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let Some(market_data) = &state.market_data else {
        return Err(ApiError {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "market data provider is not configured".to_string(),
        });
    };

    let investment = query.investment.unwrap_or(MIN_INVESTMENT_USD);
    let report = service::analyze_ticker(market_data.as_ref(), &ticker, investment).await?;
    Ok(Json(report))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
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
