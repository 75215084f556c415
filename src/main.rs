mod app;
mod cache;
mod db;
mod errors;
mod external;
mod logging;
mod models;
mod routes;
mod services;
mod state;
mod utils;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use crate::external::fallback_provider::FallbackProvider;
use crate::external::finnhub::FinnhubProvider;
use crate::external::market_provider::MarketDataProvider;
use crate::external::mock::MockMarketData;
use crate::logging::LoggingConfig;
use crate::services::auth_service::AuthService;
use crate::services::market_data::MarketDataService;
use crate::state::AppState;

const CACHE_SWEEP_INTERVAL_SECS: u64 = 600;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    logging::init_logging(LoggingConfig::from_env())?;

    let database_url = std::env::var("DATABASE_URL")?;
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    // Select market data provider based on MARKET_PROVIDER env var (defaults to multi)
    let provider_name = std::env::var("MARKET_PROVIDER").unwrap_or_else(|_| "multi".to_string());

    let provider: Arc<dyn MarketDataProvider> = match provider_name.to_lowercase().as_str() {
        "finnhub" => {
            tracing::info!("📊 Using market data provider: Finnhub only");
            Arc::new(
                FinnhubProvider::from_env()
                    .map_err(|e| format!("Failed to create FinnhubProvider: {}", e))?,
            )
        }
        "mock" => {
            tracing::info!("📊 Using market data provider: deterministic mock");
            Arc::new(MockMarketData::new())
        }
        "multi" => match FinnhubProvider::from_env() {
            Ok(finnhub) => {
                tracing::info!(
                    "📊 Using market data provider: Multi-provider (Finnhub + mock fallback)"
                );
                Arc::new(FallbackProvider::new(
                    Box::new(finnhub),
                    Box::new(MockMarketData::new()),
                ))
            }
            Err(e) => {
                tracing::warn!("⚠️ Finnhub unavailable ({}), falling back to mock data", e);
                Arc::new(MockMarketData::new())
            }
        },
        _ => {
            return Err(format!(
                "Invalid MARKET_PROVIDER: {}. Must be 'finnhub', 'mock', or 'multi'",
                provider_name
            )
            .into());
        }
    };

    let market_data = MarketDataService::new(provider);
    let auth = AuthService::from_env()?;

    // Periodic sweep so stale quote entries don't pile up between requests
    let sweeper = market_data.clone();
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(Duration::from_secs(CACHE_SWEEP_INTERVAL_SECS));
        loop {
            interval.tick().await;
            sweeper.cleanup_expired();
        }
    });

    let state = AppState {
        pool,
        market_data,
        auth,
    };
    let app = app::create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Sproutvest backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
