use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{CreateSproutRequest, RespondSproutRequest, SproutRequest};
use crate::services;
use crate::services::auth_service::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_sprout_request))
        .route("/code/:code", get(lookup_sprout_request))
        .route("/code/:code/respond", patch(respond_sprout_request))
}

pub async fn create_sprout_request(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(data): Json<CreateSproutRequest>,
) -> Result<Json<SproutRequest>, AppError> {
    info!(
        "POST /api/sprout-requests - Inviting {} for child {}",
        data.contributor_name, data.child_id
    );
    let request = services::sprout_request_service::create(&state.pool, claims.sub, data)
        .await
        .map_err(|e| {
            error!("Failed to create sprout request: {}", e);
            e
        })?;
    Ok(Json(request))
}

// Public: the invite link carries the code, the recipient has no account.
pub async fn lookup_sprout_request(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<SproutRequest>, AppError> {
    info!("GET /api/sprout-requests/code/{} - Resolving invite", code);
    let request = services::sprout_request_service::lookup(&state.pool, &code)
        .await
        .map_err(|e| {
            error!("Failed to resolve sprout request {}: {}", code, e);
            e
        })?;
    Ok(Json(request))
}

pub async fn respond_sprout_request(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(data): Json<RespondSproutRequest>,
) -> Result<Json<SproutRequest>, AppError> {
    info!(
        "PATCH /api/sprout-requests/code/{}/respond - accept={}",
        code, data.accept
    );
    let request = services::sprout_request_service::respond(&state.pool, &code, data.accept)
        .await
        .map_err(|e| {
            error!("Failed to respond to sprout request {}: {}", code, e);
            e
        })?;
    Ok(Json(request))
}
