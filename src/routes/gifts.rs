use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{CreateGift, Gift, GiftWithInvestment};
use crate::services;
use crate::services::auth_service::{AuthUser, OptionalAuthUser};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_gift))
        .route("/child/:child_id", get(gifts_for_child))
        .route("/:id/approve", patch(approve_gift))
        .route("/:id/reject", patch(reject_gift))
        .route("/:id/viewed", patch(mark_viewed))
}

// Public: guests gift without an account. A parent's own token flips the
// purchase onto the self-approval path.
#[axum::debug_handler]
pub async fn create_gift(
    State(state): State<AppState>,
    OptionalAuthUser(claims): OptionalAuthUser,
    Json(data): Json<CreateGift>,
) -> Result<Json<Gift>, AppError> {
    info!(
        "POST /api/gifts - Creating gift for child {} from {}",
        data.child_id, data.contributor_name
    );
    let gift = services::gift_service::create_gift(&state.pool, &state.market_data, claims, data)
        .await
        .map_err(|e| {
            error!("Failed to create gift: {}", e);
            e
        })?;
    Ok(Json(gift))
}

pub async fn gifts_for_child(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(child_id): Path<Uuid>,
) -> Result<Json<Vec<GiftWithInvestment>>, AppError> {
    info!("GET /api/gifts/child/{} - Listing gifts", child_id);
    let gifts = services::gift_service::gifts_for_child(&state.pool, claims.sub, child_id)
        .await
        .map_err(|e| {
            error!("Failed to list gifts for child {}: {}", child_id, e);
            e
        })?;
    Ok(Json(gifts))
}

pub async fn approve_gift(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Gift>, AppError> {
    info!("PATCH /api/gifts/{}/approve - Approving gift", id);
    let gift = services::gift_service::approve_gift(&state.pool, claims.sub, id)
        .await
        .map_err(|e| {
            error!("Failed to approve gift {}: {}", id, e);
            e
        })?;
    Ok(Json(gift))
}

pub async fn reject_gift(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Gift>, AppError> {
    info!("PATCH /api/gifts/{}/reject - Rejecting gift", id);
    let gift = services::gift_service::reject_gift(&state.pool, claims.sub, id)
        .await
        .map_err(|e| {
            error!("Failed to reject gift {}: {}", id, e);
            e
        })?;
    Ok(Json(gift))
}

pub async fn mark_viewed(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Gift>, AppError> {
    info!("PATCH /api/gifts/{}/viewed - Marking gift viewed", id);
    let gift = services::gift_service::mark_viewed(&state.pool, claims.sub, id)
        .await
        .map_err(|e| {
            error!("Failed to mark gift {} viewed: {}", id, e);
            e
        })?;
    Ok(Json(gift))
}
