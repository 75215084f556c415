use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Contributor;

pub async fn insert(pool: &PgPool, input: Contributor) -> Result<Contributor, sqlx::Error> {
    sqlx::query_as::<_, Contributor>(
        "INSERT INTO contributors (id, name, email, phone, password_hash, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id, name, email, phone, password_hash, created_at",
    )
    .bind(input.id)
    .bind(input.name)
    .bind(input.email)
    .bind(input.phone)
    .bind(input.password_hash)
    .bind(input.created_at)
    .fetch_one(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<Contributor>, sqlx::Error> {
    sqlx::query_as::<_, Contributor>(
        "SELECT id, name, email, phone, password_hash, created_at
         FROM contributors
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_by_email(pool: &PgPool, email: &str) -> Result<Option<Contributor>, sqlx::Error> {
    sqlx::query_as::<_, Contributor>(
        "SELECT id, name, email, phone, password_hash, created_at
         FROM contributors
         WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}
