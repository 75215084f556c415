use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{AuthResponse, CreateUser, LoginRequest};
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

#[axum::debug_handler]
pub async fn signup(
    State(state): State<AppState>,
    Json(data): Json<CreateUser>,
) -> Result<Json<AuthResponse>, AppError> {
    info!("POST /api/auth/signup - Registering user");
    let user = services::user_service::signup(&state.pool, data).await.map_err(|e| {
        error!("Signup failed: {}", e);
        e
    })?;
    let token = state.auth.issue_token(user.id, &user.email)?;
    Ok(Json(AuthResponse { token, user: user.into() }))
}

pub async fn login(
    State(state): State<AppState>,
    Json(data): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    info!("POST /api/auth/login - Logging in user");
    let user = services::user_service::login(&state.pool, data).await.map_err(|e| {
        error!("Login failed: {}", e);
        e
    })?;
    let token = state.auth.issue_token(user.id, &user.email)?;
    Ok(Json(AuthResponse { token, user: user.into() }))
}
