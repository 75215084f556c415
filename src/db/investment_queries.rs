use bigdecimal::BigDecimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Investment;

// Symbol is the natural key; re-materializing an already known symbol just
// refreshes its price instead of adding a duplicate row.
pub async fn upsert_by_symbol(pool: &PgPool, input: Investment) -> Result<Investment, sqlx::Error> {
    sqlx::query_as::<_, Investment>(
        "INSERT INTO investments (id, symbol, name, investment_type, current_price, ytd_return, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         ON CONFLICT (symbol) DO UPDATE
         SET current_price = EXCLUDED.current_price,
             ytd_return = COALESCE(EXCLUDED.ytd_return, investments.ytd_return),
             updated_at = now()
         RETURNING id, symbol, name, investment_type, current_price, ytd_return, created_at, updated_at",
    )
    .bind(input.id)
    .bind(input.symbol)
    .bind(input.name)
    .bind(input.investment_type)
    .bind(input.current_price)
    .bind(input.ytd_return)
    .bind(input.created_at)
    .bind(input.updated_at)
    .fetch_one(pool)
    .await
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Investment>, sqlx::Error> {
    sqlx::query_as::<_, Investment>(
        "SELECT id, symbol, name, investment_type, current_price, ytd_return, created_at, updated_at
         FROM investments
         ORDER BY symbol",
    )
    .fetch_all(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<Investment>, sqlx::Error> {
    sqlx::query_as::<_, Investment>(
        "SELECT id, symbol, name, investment_type, current_price, ytd_return, created_at, updated_at
         FROM investments
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_by_symbols(
    pool: &PgPool,
    symbols: &[String],
) -> Result<Vec<Investment>, sqlx::Error> {
    sqlx::query_as::<_, Investment>(
        "SELECT id, symbol, name, investment_type, current_price, ytd_return, created_at, updated_at
         FROM investments
         WHERE symbol = ANY($1)",
    )
    .bind(symbols)
    .fetch_all(pool)
    .await
}

pub async fn fetch_by_symbol(pool: &PgPool, symbol: &str) -> Result<Option<Investment>, sqlx::Error> {
    sqlx::query_as::<_, Investment>(
        "SELECT id, symbol, name, investment_type, current_price, ytd_return, created_at, updated_at
         FROM investments
         WHERE symbol = $1",
    )
    .bind(symbol)
    .fetch_optional(pool)
    .await
}

pub async fn update_price(
    pool: &PgPool,
    id: Uuid,
    current_price: BigDecimal,
    ytd_return: Option<BigDecimal>,
) -> Result<Option<Investment>, sqlx::Error> {
    sqlx::query_as::<_, Investment>(
        "UPDATE investments
         SET current_price = $2,
             ytd_return = COALESCE($3, ytd_return),
             updated_at = now()
         WHERE id = $1
         RETURNING id, symbol, name, investment_type, current_price, ytd_return, created_at, updated_at",
    )
    .bind(id)
    .bind(current_price)
    .bind(ytd_return)
    .fetch_optional(pool)
    .await
}
