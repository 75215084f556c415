use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::external::market_provider::Quote;
use crate::models::{Investment, InvestmentSearchResult};
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_investments))
        .route("/search", get(search_investments))
        .route("/:symbol/quote", get(get_quote))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

pub async fn list_investments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Investment>>, AppError> {
    info!("GET /api/investments - Listing investments");
    let investments = services::investment_service::list(&state.pool).await.map_err(|e| {
        error!("Failed to list investments: {}", e);
        e
    })?;
    Ok(Json(investments))
}

pub async fn search_investments(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<InvestmentSearchResult>>, AppError> {
    info!("GET /api/investments/search?q={} - Searching symbols", params.q);
    let results =
        services::investment_service::search(&state.pool, &state.market_data, &params.q)
            .await
            .map_err(|e| {
                error!("Failed to search investments for '{}': {}", params.q, e);
                e
            })?;
    Ok(Json(results))
}

pub async fn get_quote(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<Quote>, AppError> {
    info!("GET /api/investments/{}/quote - Fetching quote", symbol);
    let quote = services::investment_service::quote(&state.pool, &state.market_data, &symbol)
        .await
        .map_err(|e| {
            error!("Failed to fetch quote for {}: {}", symbol, e);
            e
        })?;
    Ok(Json(quote))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_compile() {
        let _router: Router<AppState> = router();
    }
}
