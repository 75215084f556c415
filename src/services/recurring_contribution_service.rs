use bigdecimal::BigDecimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{CreateRecurringContribution, RecurringContribution};
use crate::services::auth_service;
use crate::services::child_service;

pub async fn create(
    pool: &PgPool,
    data: CreateRecurringContribution,
) -> Result<RecurringContribution, AppError> {
    if data.contributor_name.trim().is_empty() {
        return Err(AppError::Validation("Contributor name must not be empty".to_string()));
    }
    if let Some(email) = &data.contributor_email {
        if !auth_service::is_valid_email(email) {
            return Err(AppError::Validation(format!("Invalid email address: {}", email)));
        }
    }
    if data.amount <= BigDecimal::from(0) {
        return Err(AppError::Validation("Amount must be positive".to_string()));
    }
    if db::child_queries::fetch_one(pool, data.child_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Child {} not found", data.child_id)));
    }
    if let Some(investment_id) = data.investment_id {
        if db::investment_queries::fetch_one(pool, investment_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Investment {} not found", investment_id)));
        }
    }

    db::recurring_contribution_queries::insert(pool, RecurringContribution::new(data))
        .await
        .map_err(AppError::Db)
}

pub async fn list_for_child(
    pool: &PgPool,
    requester: Uuid,
    child_id: Uuid,
) -> Result<Vec<RecurringContribution>, AppError> {
    let child = child_service::fetch_owned(pool, requester, child_id).await?;
    db::recurring_contribution_queries::fetch_for_child(pool, child.id)
        .await
        .map_err(AppError::Db)
}
