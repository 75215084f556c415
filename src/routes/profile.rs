use axum::extract::State;
use axum::routing::{get, patch};
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{UpdateProfile, UserProfile};
use crate::services;
use crate::services::auth_service::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile))
        .route("/", patch(update_profile))
}

pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<UserProfile>, AppError> {
    info!("GET /api/profile - Fetching profile for {}", claims.sub);
    let user = services::user_service::get_profile(&state.pool, claims.sub).await.map_err(|e| {
        error!("Failed to fetch profile for {}: {}", claims.sub, e);
        e
    })?;
    Ok(Json(user.into()))
}

pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(data): Json<UpdateProfile>,
) -> Result<Json<UserProfile>, AppError> {
    info!("PATCH /api/profile - Updating profile for {}", claims.sub);
    let user = services::user_service::update_profile(&state.pool, claims.sub, data)
        .await
        .map_err(|e| {
            error!("Failed to update profile for {}: {}", claims.sub, e);
            e
        })?;
    Ok(Json(user.into()))
}
