use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{CreateRecurringContribution, RecurringContribution};
use crate::services;
use crate::services::auth_service::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_recurring_contribution))
        .route("/child/:child_id", get(list_for_child))
}

// Public: contributors pledge from the gift link without an account.
pub async fn create_recurring_contribution(
    State(state): State<AppState>,
    Json(data): Json<CreateRecurringContribution>,
) -> Result<Json<RecurringContribution>, AppError> {
    info!(
        "POST /api/recurring-contributions - {} pledging for child {}",
        data.contributor_name, data.child_id
    );
    let contribution =
        services::recurring_contribution_service::create(&state.pool, data)
            .await
            .map_err(|e| {
                error!("Failed to create recurring contribution: {}", e);
                e
            })?;
    Ok(Json(contribution))
}

pub async fn list_for_child(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(child_id): Path<Uuid>,
) -> Result<Json<Vec<RecurringContribution>>, AppError> {
    info!(
        "GET /api/recurring-contributions/child/{} - Listing pledges",
        child_id
    );
    let contributions =
        services::recurring_contribution_service::list_for_child(&state.pool, claims.sub, child_id)
            .await
            .map_err(|e| {
                error!("Failed to list recurring contributions for {}: {}", child_id, e);
                e
            })?;
    Ok(Json(contributions))
}
