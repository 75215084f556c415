use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{Child, CreateChild, GiftLinkChild};
use crate::utils;

const GIFT_LINK_CODE_LENGTH: usize = 10;

pub async fn create(pool: &PgPool, parent_id: Uuid, data: CreateChild) -> Result<Child, AppError> {
    if data.name.trim().is_empty() {
        return Err(AppError::Validation("Child name must not be empty".to_string()));
    }
    if !(0..18).contains(&data.age) {
        return Err(AppError::Validation("Child age must be between 0 and 17".to_string()));
    }

    let child = Child::new(
        parent_id,
        data.name.trim().to_string(),
        data.age,
        data.birthday,
        utils::generate_code(GIFT_LINK_CODE_LENGTH),
    );
    let stored = db::child_queries::insert(pool, child).await.map_err(|e| {
        error!("Failed to create child for parent {}: {}", parent_id, e);
        AppError::Db(e)
    })?;

    info!("🌱 Child {} created with gift link {}", stored.id, stored.gift_link_code);
    Ok(stored)
}

pub async fn list_for_parent(
    pool: &PgPool,
    requester: Uuid,
    parent_id: Uuid,
) -> Result<Vec<Child>, AppError> {
    if requester != parent_id {
        return Err(AppError::Forbidden);
    }
    db::child_queries::fetch_for_parent(pool, parent_id)
        .await
        .map_err(AppError::Db)
}

pub async fn fetch_owned(pool: &PgPool, owner: Uuid, child_id: Uuid) -> Result<Child, AppError> {
    let child = db::child_queries::fetch_one(pool, child_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Child {} not found", child_id)))?;
    if child.parent_id != owner {
        return Err(AppError::Forbidden);
    }
    Ok(child)
}

pub async fn gift_link_lookup(pool: &PgPool, code: &str) -> Result<GiftLinkChild, AppError> {
    db::child_queries::fetch_gift_link_view(pool, code)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No gift link with code {}", code)))
}
