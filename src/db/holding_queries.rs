use bigdecimal::BigDecimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{HoldingWithInvestment, PortfolioHolding};

pub async fn fetch_for_child(
    pool: &PgPool,
    child_id: Uuid,
) -> Result<Vec<HoldingWithInvestment>, sqlx::Error> {
    sqlx::query_as::<_, HoldingWithInvestment>(
        "SELECT h.id, h.child_id, h.investment_id, h.shares, h.average_cost, h.current_value, h.updated_at,
                i.symbol, i.name, i.investment_type, i.current_price, i.ytd_return
         FROM portfolio_holdings h
         JOIN investments i ON i.id = h.investment_id
         WHERE h.child_id = $1
         ORDER BY h.created_at",
    )
    .bind(child_id)
    .fetch_all(pool)
    .await
}

// Runs inside the approval transaction. The row lock serializes concurrent
// approvals that merge into the same holding.
pub async fn fetch_for_update(
    conn: &mut PgConnection,
    child_id: Uuid,
    investment_id: Uuid,
) -> Result<Option<PortfolioHolding>, sqlx::Error> {
    sqlx::query_as::<_, PortfolioHolding>(
        "SELECT id, child_id, investment_id, shares, average_cost, current_value, created_at, updated_at
         FROM portfolio_holdings
         WHERE child_id = $1 AND investment_id = $2
         FOR UPDATE",
    )
    .bind(child_id)
    .bind(investment_id)
    .fetch_optional(&mut *conn)
    .await
}

pub async fn insert(
    conn: &mut PgConnection,
    input: PortfolioHolding,
) -> Result<PortfolioHolding, sqlx::Error> {
    sqlx::query_as::<_, PortfolioHolding>(
        "INSERT INTO portfolio_holdings (id, child_id, investment_id, shares, average_cost, current_value, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING id, child_id, investment_id, shares, average_cost, current_value, created_at, updated_at",
    )
    .bind(input.id)
    .bind(input.child_id)
    .bind(input.investment_id)
    .bind(input.shares)
    .bind(input.average_cost)
    .bind(input.current_value)
    .bind(input.created_at)
    .bind(input.updated_at)
    .fetch_one(&mut *conn)
    .await
}

pub async fn update_position(
    conn: &mut PgConnection,
    id: Uuid,
    shares: BigDecimal,
    average_cost: BigDecimal,
    current_value: BigDecimal,
) -> Result<PortfolioHolding, sqlx::Error> {
    sqlx::query_as::<_, PortfolioHolding>(
        "UPDATE portfolio_holdings
         SET shares = $2,
             average_cost = $3,
             current_value = $4,
             updated_at = now()
         WHERE id = $1
         RETURNING id, child_id, investment_id, shares, average_cost, current_value, created_at, updated_at",
    )
    .bind(id)
    .bind(shares)
    .bind(average_cost)
    .bind(current_value)
    .fetch_one(&mut *conn)
    .await
}
