use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    ContributorAuthResponse, CreateContributor, GiftWithInvestment, LoginRequest,
};
use crate::services;
use crate::services::auth_service::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/:id/gifts", get(gifts_for_contributor))
}

pub async fn signup(
    State(state): State<AppState>,
    Json(data): Json<CreateContributor>,
) -> Result<Json<ContributorAuthResponse>, AppError> {
    info!("POST /api/contributors/signup - Registering {}", data.email);
    let contributor = services::contributor_service::signup(&state.pool, data)
        .await
        .map_err(|e| {
            error!("Failed to register contributor: {}", e);
            e
        })?;
    let token = state.auth.issue_token(contributor.id, &contributor.email)?;
    Ok(Json(ContributorAuthResponse { token, contributor: contributor.into() }))
}

pub async fn signin(
    State(state): State<AppState>,
    Json(data): Json<LoginRequest>,
) -> Result<Json<ContributorAuthResponse>, AppError> {
    info!("POST /api/contributors/signin - Signing in {}", data.email);
    let contributor = services::contributor_service::signin(&state.pool, data)
        .await
        .map_err(|e| {
            error!("Failed to sign in contributor: {}", e);
            e
        })?;
    let token = state.auth.issue_token(contributor.id, &contributor.email)?;
    Ok(Json(ContributorAuthResponse { token, contributor: contributor.into() }))
}

pub async fn gifts_for_contributor(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<GiftWithInvestment>>, AppError> {
    info!("GET /api/contributors/{}/gifts - Listing sent gifts", id);
    let gifts = services::gift_service::gifts_for_contributor(&state.pool, claims.sub, id)
        .await
        .map_err(|e| {
            error!("Failed to list gifts for contributor {}: {}", id, e);
            e
        })?;
    Ok(Json(gifts))
}
