use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// One row per (child, investment). Approved gifts merge into this via the
// weighted-average cost basis; there is never a second row for the same pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PortfolioHolding {
    pub id: uuid::Uuid,
    pub child_id: uuid::Uuid,
    pub investment_id: uuid::Uuid,
    pub shares: BigDecimal,
    pub average_cost: BigDecimal,
    pub current_value: BigDecimal,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// Holding joined with its investment, as served on the portfolio screen.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HoldingWithInvestment {
    pub id: uuid::Uuid,
    pub child_id: uuid::Uuid,
    pub investment_id: uuid::Uuid,
    pub shares: BigDecimal,
    pub average_cost: BigDecimal,
    pub current_value: BigDecimal,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub symbol: String,
    pub name: String,
    pub investment_type: String,
    pub current_price: BigDecimal,
    pub ytd_return: Option<BigDecimal>,
}

#[derive(Debug, Serialize)]
pub struct PortfolioView {
    pub child_id: uuid::Uuid,
    pub total_value: BigDecimal,
    pub total_invested: BigDecimal,
    pub holdings: Vec<HoldingWithInvestment>,
}

impl PortfolioHolding {
    pub fn new(
        child_id: uuid::Uuid,
        investment_id: uuid::Uuid,
        shares: BigDecimal,
        average_cost: BigDecimal,
        current_value: BigDecimal,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            child_id,
            investment_id,
            shares,
            average_cost,
            current_value,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }
}
