use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::PortfolioView;
use crate::services;
use crate::services::auth_service::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/:child_id", get(get_portfolio))
}

pub async fn get_portfolio(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(child_id): Path<Uuid>,
) -> Result<Json<PortfolioView>, AppError> {
    info!("GET /api/portfolio/{} - Fetching portfolio", child_id);
    let view = services::portfolio_service::get_portfolio(&state.pool, claims.sub, child_id)
        .await
        .map_err(|e| {
            error!("Failed to fetch portfolio for child {}: {}", child_id, e);
            e
        })?;
    Ok(Json(view))
}
