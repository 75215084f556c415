use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Child, GiftLinkChild};

pub async fn insert(pool: &PgPool, input: Child) -> Result<Child, sqlx::Error> {
    sqlx::query_as::<_, Child>(
        "INSERT INTO children (id, parent_id, name, age, birthday, gift_link_code, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id, parent_id, name, age, birthday, gift_link_code, created_at",
    )
    .bind(input.id)
    .bind(input.parent_id)
    .bind(input.name)
    .bind(input.age)
    .bind(input.birthday)
    .bind(input.gift_link_code)
    .bind(input.created_at)
    .fetch_one(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<Child>, sqlx::Error> {
    sqlx::query_as::<_, Child>(
        "SELECT id, parent_id, name, age, birthday, gift_link_code, created_at
         FROM children
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_for_parent(pool: &PgPool, parent_id: Uuid) -> Result<Vec<Child>, sqlx::Error> {
    sqlx::query_as::<_, Child>(
        "SELECT id, parent_id, name, age, birthday, gift_link_code, created_at
         FROM children
         WHERE parent_id = $1
         ORDER BY created_at",
    )
    .bind(parent_id)
    .fetch_all(pool)
    .await
}

// Public gift-page lookup; exposes the parent's display name only.
pub async fn fetch_gift_link_view(
    pool: &PgPool,
    code: &str,
) -> Result<Option<GiftLinkChild>, sqlx::Error> {
    sqlx::query_as::<_, GiftLinkChild>(
        "SELECT c.id, c.name, c.age, c.gift_link_code, u.name AS parent_name
         FROM children c
         JOIN users u ON u.id = c.parent_id
         WHERE c.gift_link_code = $1",
    )
    .bind(code)
    .fetch_optional(pool)
    .await
}
