use sqlx::PgPool;

use crate::models::SproutRequest;

pub async fn insert(pool: &PgPool, input: SproutRequest) -> Result<SproutRequest, sqlx::Error> {
    sqlx::query_as::<_, SproutRequest>(
        "INSERT INTO sprout_requests (id, parent_id, child_id, contributor_name, phone, request_code, status, responded_at, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING id, parent_id, child_id, contributor_name, phone, request_code, status, responded_at, created_at",
    )
    .bind(input.id)
    .bind(input.parent_id)
    .bind(input.child_id)
    .bind(input.contributor_name)
    .bind(input.phone)
    .bind(input.request_code)
    .bind(input.status)
    .bind(input.responded_at)
    .bind(input.created_at)
    .fetch_one(pool)
    .await
}

pub async fn fetch_by_code(pool: &PgPool, code: &str) -> Result<Option<SproutRequest>, sqlx::Error> {
    sqlx::query_as::<_, SproutRequest>(
        "SELECT id, parent_id, child_id, contributor_name, phone, request_code, status, responded_at, created_at
         FROM sprout_requests
         WHERE request_code = $1",
    )
    .bind(code)
    .fetch_optional(pool)
    .await
}

// Single-shot like gift decisions: an already responded request matches
// nothing and the caller sees None.
pub async fn mark_responded(
    pool: &PgPool,
    code: &str,
    status: &str,
) -> Result<Option<SproutRequest>, sqlx::Error> {
    sqlx::query_as::<_, SproutRequest>(
        "UPDATE sprout_requests
         SET status = $2, responded_at = now()
         WHERE request_code = $1 AND status = 'pending'
         RETURNING id, parent_id, child_id, contributor_name, phone, request_code, status, responded_at, created_at",
    )
    .bind(code)
    .bind(status)
    .fetch_optional(pool)
    .await
}
