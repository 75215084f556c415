use bigdecimal::BigDecimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::PortfolioView;
use crate::services::child_service;
use crate::services::gift_service::quantize_money;

// Values are served as stored; approvals are the only writer. Totals are
// summed here rather than in SQL so they share the one quantization path.
pub async fn get_portfolio(
    pool: &PgPool,
    requester: Uuid,
    child_id: Uuid,
) -> Result<PortfolioView, AppError> {
    let child = child_service::fetch_owned(pool, requester, child_id).await?;
    let holdings = db::holding_queries::fetch_for_child(pool, child.id)
        .await
        .map_err(AppError::Db)?;

    let mut total_value = BigDecimal::from(0);
    let mut total_invested = BigDecimal::from(0);
    for holding in &holdings {
        total_value += &holding.current_value;
        total_invested += &holding.average_cost * &holding.shares;
    }

    Ok(PortfolioView {
        child_id: child.id,
        total_value: quantize_money(&total_value),
        total_invested: quantize_money(&total_invested),
        holdings,
    })
}
