use sqlx::PgPool;
use tracing::error;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{CreateUser, LoginRequest, UpdateProfile, User};
use crate::services::auth_service;

pub async fn signup(pool: &PgPool, data: CreateUser) -> Result<User, AppError> {
    if data.name.trim().is_empty() {
        return Err(AppError::Validation("Name must not be empty".to_string()));
    }
    if !auth_service::is_valid_email(&data.email) {
        return Err(AppError::Validation(format!("Invalid email address: {}", data.email)));
    }
    if data.password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    if db::user_queries::fetch_by_email(pool, &data.email).await?.is_some() {
        return Err(AppError::Validation(format!("{} is already registered", data.email)));
    }

    let password_hash = auth_service::hash_password(&data.password)?;
    let user = User::new(data.email, password_hash, data.name.trim().to_string());
    db::user_queries::insert(pool, user).await.map_err(|e| {
        error!("Failed to create user: {}", e);
        AppError::Db(e)
    })
}

pub async fn login(pool: &PgPool, data: LoginRequest) -> Result<User, AppError> {
    let user = db::user_queries::fetch_by_email(pool, &data.email)
        .await?
        .ok_or(AppError::Unauthorized)?;
    if !auth_service::verify_password(&data.password, &user.password_hash)? {
        return Err(AppError::Unauthorized);
    }
    Ok(user)
}

pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<User, AppError> {
    db::user_queries::fetch_one(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
}

pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    data: UpdateProfile,
) -> Result<User, AppError> {
    if let Some(name) = &data.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Name must not be empty".to_string()));
        }
    }
    db::user_queries::update_profile(pool, user_id, data)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
}
