use sqlx::PgPool;
use tracing::{error, info};

use crate::db;
use crate::errors::AppError;
use crate::models::{Contributor, CreateContributor, LoginRequest};
use crate::services::auth_service;

pub async fn signup(pool: &PgPool, data: CreateContributor) -> Result<Contributor, AppError> {
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
    if db::contributor_queries::fetch_by_email(pool, &data.email).await?.is_some() {
        return Err(AppError::Validation(format!("{} is already registered", data.email)));
    }

    let password_hash = auth_service::hash_password(&data.password)?;
    let contributor = Contributor::new(
        data.name.trim().to_string(),
        data.email,
        data.phone,
        password_hash,
    );
    let stored = db::contributor_queries::insert(pool, contributor).await.map_err(|e| {
        error!("Failed to create contributor: {}", e);
        AppError::Db(e)
    })?;

    // Gifts given as a guest under this email now show up in their history.
    let adopted = db::gift_queries::adopt_guest_gifts(pool, stored.id, &stored.email).await?;
    if adopted > 0 {
        info!("Contributor {} adopted {} guest gift(s)", stored.id, adopted);
    }

    Ok(stored)
}

pub async fn signin(pool: &PgPool, data: LoginRequest) -> Result<Contributor, AppError> {
    let contributor = db::contributor_queries::fetch_by_email(pool, &data.email)
        .await?
        .ok_or(AppError::Unauthorized)?;
    if !auth_service::verify_password(&data.password, &contributor.password_hash)? {
        return Err(AppError::Unauthorized);
    }
    Ok(contributor)
}
