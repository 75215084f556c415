use sqlx::PgPool;
use uuid::Uuid;

use crate::models::RecurringContribution;

pub async fn insert(
    pool: &PgPool,
    input: RecurringContribution,
) -> Result<RecurringContribution, sqlx::Error> {
    sqlx::query_as::<_, RecurringContribution>(
        "INSERT INTO recurring_contributions (id, child_id, contributor_name, contributor_email, investment_id, amount, frequency, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING id, child_id, contributor_name, contributor_email, investment_id, amount, frequency, created_at",
    )
    .bind(input.id)
    .bind(input.child_id)
    .bind(input.contributor_name)
    .bind(input.contributor_email)
    .bind(input.investment_id)
    .bind(input.amount)
    .bind(input.frequency)
    .bind(input.created_at)
    .fetch_one(pool)
    .await
}

pub async fn fetch_for_child(
    pool: &PgPool,
    child_id: Uuid,
) -> Result<Vec<RecurringContribution>, sqlx::Error> {
    sqlx::query_as::<_, RecurringContribution>(
        "SELECT id, child_id, contributor_name, contributor_email, investment_id, amount, frequency, created_at
         FROM recurring_contributions
         WHERE child_id = $1
         ORDER BY created_at DESC",
    )
    .bind(child_id)
    .fetch_all(pool)
    .await
}
