use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{UpdateProfile, User};

pub async fn insert(pool: &PgPool, input: User) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (id, email, password_hash, name, bank_account, profile_image_url, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id, email, password_hash, name, bank_account, profile_image_url, created_at",
    )
    .bind(input.id)
    .bind(input.email)
    .bind(input.password_hash)
    .bind(input.name)
    .bind(input.bank_account)
    .bind(input.profile_image_url)
    .bind(input.created_at)
    .fetch_one(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, name, bank_account, profile_image_url, created_at
         FROM users
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, name, bank_account, profile_image_url, created_at
         FROM users
         WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

// Fields left out of the payload keep their stored value.
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    input: UpdateProfile,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users
         SET name = COALESCE($2, name),
             bank_account = COALESCE($3, bank_account),
             profile_image_url = COALESCE($4, profile_image_url)
         WHERE id = $1
         RETURNING id, email, password_hash, name, bank_account, profile_image_url, created_at",
    )
    .bind(id)
    .bind(input.name)
    .bind(input.bank_account)
    .bind(input.profile_image_url)
    .fetch_optional(pool)
    .await
}
