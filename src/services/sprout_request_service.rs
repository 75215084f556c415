use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{CreateSproutRequest, SproutRequest, SproutRequestStatus};
use crate::services::child_service;
use crate::utils;

const REQUEST_CODE_LENGTH: usize = 10;

pub async fn create(
    pool: &PgPool,
    parent_id: Uuid,
    data: CreateSproutRequest,
) -> Result<SproutRequest, AppError> {
    if data.contributor_name.trim().is_empty() {
        return Err(AppError::Validation("Contributor name must not be empty".to_string()));
    }
    if data.phone.trim().is_empty() {
        return Err(AppError::Validation("Phone number must not be empty".to_string()));
    }
    let child = child_service::fetch_owned(pool, parent_id, data.child_id).await?;

    let request = SproutRequest::new(
        parent_id,
        child.id,
        data.contributor_name.trim().to_string(),
        data.phone.trim().to_string(),
        utils::generate_code(REQUEST_CODE_LENGTH),
    );
    let stored = db::sprout_request_queries::insert(pool, request).await?;

    info!("Sprout request {} sent for child {}", stored.request_code, child.id);
    Ok(stored)
}

pub async fn lookup(pool: &PgPool, code: &str) -> Result<SproutRequest, AppError> {
    db::sprout_request_queries::fetch_by_code(pool, code)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No sprout request with code {}", code)))
}

// One transition only; whoever answers first wins and later answers fail.
pub async fn respond(pool: &PgPool, code: &str, accept: bool) -> Result<SproutRequest, AppError> {
    lookup(pool, code).await?;

    let status = if accept {
        SproutRequestStatus::Accepted
    } else {
        SproutRequestStatus::Declined
    };
    db::sprout_request_queries::mark_responded(pool, code, status.as_str())
        .await?
        .ok_or_else(|| {
            AppError::Validation("Sprout request has already been responded to".to_string())
        })
}
