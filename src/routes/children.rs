use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Child, CreateChild, GiftLinkChild};
use crate::services;
use crate::services::auth_service::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_child))
        .route("/:parent_id", get(list_children))
        .route("/by-gift-code/:code", get(gift_link_lookup))
}

pub async fn create_child(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(data): Json<CreateChild>,
) -> Result<Json<Child>, AppError> {
    info!("POST /api/children - Creating child for parent {}", claims.sub);
    let child = services::child_service::create(&state.pool, claims.sub, data)
        .await
        .map_err(|e| {
            error!("Failed to create child: {}", e);
            e
        })?;
    Ok(Json(child))
}

pub async fn list_children(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(parent_id): Path<Uuid>,
) -> Result<Json<Vec<Child>>, AppError> {
    info!("GET /api/children/{} - Listing children", parent_id);
    let children = services::child_service::list_for_parent(&state.pool, claims.sub, parent_id)
        .await
        .map_err(|e| {
            error!("Failed to list children for {}: {}", parent_id, e);
            e
        })?;
    Ok(Json(children))
}

// Public: this is what the shared gift link resolves to.
pub async fn gift_link_lookup(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<GiftLinkChild>, AppError> {
    info!("GET /api/children/by-gift-code/{} - Resolving gift link", code);
    let child = services::child_service::gift_link_lookup(&state.pool, &code)
        .await
        .map_err(|e| {
            error!("Failed to resolve gift link {}: {}", code, e);
            e
        })?;
    Ok(Json(child))
}
