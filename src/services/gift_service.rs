use bigdecimal::BigDecimal;
use sqlx::{PgConnection, PgPool};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{
    Child, CreateGift, Gift, GiftWithInvestment, Investment, InvestmentType, PortfolioHolding,
};
use crate::services::auth_service::{self, Claims};
use crate::services::market_data::MarketDataService;

/// Search results for symbols we have not materialized yet carry this prefix
/// instead of an investment UUID.
pub const TEMP_SYMBOL_PREFIX: &str = "temp_";

const SHARE_SCALE: i64 = 6;
const MONEY_SCALE: i64 = 2;

// The two guard digits bring division results down to a width `round` can
// digest before the final half-away-from-zero rounding.
pub fn quantize_shares(value: &BigDecimal) -> BigDecimal {
    value.with_scale(SHARE_SCALE + 2).round(SHARE_SCALE)
}

pub fn quantize_money(value: &BigDecimal) -> BigDecimal {
    value.with_scale(MONEY_SCALE + 2).round(MONEY_SCALE)
}

pub fn shares_for_amount(amount: &BigDecimal, price: &BigDecimal) -> Result<BigDecimal, AppError> {
    if price <= &BigDecimal::from(0) {
        return Err(AppError::Validation(
            "Investment price must be positive".to_string(),
        ));
    }
    let shares = quantize_shares(&(amount / price));
    if shares <= BigDecimal::from(0) {
        return Err(AppError::Validation(
            "Gift amount is too small to buy any shares at the current price".to_string(),
        ));
    }
    Ok(shares)
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedPosition {
    pub shares: BigDecimal,
    pub average_cost: BigDecimal,
    pub current_value: BigDecimal,
}

/// Weighted-average merge of an approved gift into a holding. A missing
/// holding merges against a zero position. Pure, so the arithmetic is
/// testable without a database.
pub fn merge_into_holding(
    old_shares: &BigDecimal,
    old_average_cost: &BigDecimal,
    gift_shares: &BigDecimal,
    gift_amount: &BigDecimal,
    current_price: &BigDecimal,
) -> Result<MergedPosition, AppError> {
    let new_shares = old_shares + gift_shares;
    if new_shares <= BigDecimal::from(0) {
        return Err(AppError::Internal(
            "Holding would end up without shares".to_string(),
        ));
    }

    let invested = old_average_cost * old_shares + gift_amount;
    let average_cost = quantize_money(&(&invested / &new_shares));
    let current_value = quantize_money(&(&new_shares * current_price));

    Ok(MergedPosition {
        shares: quantize_shares(&new_shares),
        average_cost,
        current_value,
    })
}

pub async fn create_gift(
    pool: &PgPool,
    market: &MarketDataService,
    actor: Option<Claims>,
    data: CreateGift,
) -> Result<Gift, AppError> {
    if data.contributor_name.trim().is_empty() {
        return Err(AppError::Validation(
            "Contributor name must not be empty".to_string(),
        ));
    }
    if let Some(email) = &data.contributor_email {
        if !auth_service::is_valid_email(email) {
            return Err(AppError::Validation(format!("Invalid email address: {}", email)));
        }
    }
    let amount = quantize_money(&data.amount);
    if amount <= BigDecimal::from(0) {
        return Err(AppError::Validation("Gift amount must be positive".to_string()));
    }

    let child = db::child_queries::fetch_one(pool, data.child_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Child {} not found", data.child_id)))?;

    let investment = resolve_investment(pool, market, &data.investment_id).await?;
    let shares = shares_for_amount(&amount, &investment.current_price)?;

    // A token is optional here. A parent gifting their own child skips the
    // approval queue; a known contributor gets the gift pinned to their
    // account; anyone else stays a guest.
    let mut contributor_id = None;
    let mut self_gift = false;
    if let Some(claims) = &actor {
        if let Some(user) = db::user_queries::fetch_one(pool, claims.sub).await? {
            self_gift = user.id == child.parent_id;
        }
        if !self_gift {
            if let Some(contributor) = db::contributor_queries::fetch_one(pool, claims.sub).await? {
                contributor_id = Some(contributor.id);
            }
        }
    }

    let gift = Gift::new(
        child.id,
        contributor_id,
        data.contributor_name.trim().to_string(),
        data.contributor_email,
        investment.id,
        amount,
        shares,
        data.message,
        data.video_url,
    );

    let mut tx = pool.begin().await?;
    let mut stored = db::gift_queries::insert(&mut tx, gift).await.map_err(|e| {
        error!("Failed to insert gift for child {}: {}", child.id, e);
        AppError::Db(e)
    })?;
    if self_gift {
        stored = db::gift_queries::mark_approved(&mut tx, stored.id)
            .await?
            .ok_or_else(|| AppError::Internal("Freshly created gift vanished".to_string()))?;
        apply_gift_to_holding(&mut tx, &stored, &investment).await?;
    }
    tx.commit().await?;

    info!(
        "🎁 Gift {} ({} of {}) created for child {} - {}",
        stored.id, stored.amount, investment.symbol, child.id, stored.status
    );
    Ok(stored)
}

pub async fn approve_gift(pool: &PgPool, approver: Uuid, gift_id: Uuid) -> Result<Gift, AppError> {
    let (gift, child) = load_gift_for_decision(pool, approver, gift_id).await?;
    let investment = db::investment_queries::fetch_one(pool, gift.investment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Investment {} not found", gift.investment_id)))?;

    let mut tx = pool.begin().await?;
    let approved = db::gift_queries::mark_approved(&mut tx, gift_id)
        .await?
        .ok_or_else(|| {
            AppError::Validation("Gift has already been approved or rejected".to_string())
        })?;
    apply_gift_to_holding(&mut tx, &approved, &investment).await?;
    tx.commit().await?;

    info!("✓ Gift {} approved; merged into child {}'s portfolio", gift_id, child.id);
    Ok(approved)
}

pub async fn reject_gift(pool: &PgPool, approver: Uuid, gift_id: Uuid) -> Result<Gift, AppError> {
    let (_, child) = load_gift_for_decision(pool, approver, gift_id).await?;

    let mut tx = pool.begin().await?;
    let rejected = db::gift_queries::mark_rejected(&mut tx, gift_id)
        .await?
        .ok_or_else(|| {
            AppError::Validation("Gift has already been approved or rejected".to_string())
        })?;
    tx.commit().await?;

    info!("Gift {} rejected for child {}", gift_id, child.id);
    Ok(rejected)
}

pub async fn mark_viewed(pool: &PgPool, owner: Uuid, gift_id: Uuid) -> Result<Gift, AppError> {
    load_gift_for_decision(pool, owner, gift_id).await?;
    db::gift_queries::mark_viewed(pool, gift_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Gift {} not found", gift_id)))
}

pub async fn gifts_for_child(
    pool: &PgPool,
    requester: Uuid,
    child_id: Uuid,
) -> Result<Vec<GiftWithInvestment>, AppError> {
    let child = db::child_queries::fetch_one(pool, child_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Child {} not found", child_id)))?;
    if child.parent_id != requester {
        return Err(AppError::Forbidden);
    }
    db::gift_queries::fetch_for_child(pool, child_id)
        .await
        .map_err(AppError::Db)
}

pub async fn gifts_for_contributor(
    pool: &PgPool,
    requester: Uuid,
    contributor_id: Uuid,
) -> Result<Vec<GiftWithInvestment>, AppError> {
    if requester != contributor_id {
        return Err(AppError::Forbidden);
    }
    db::gift_queries::fetch_for_contributor(pool, contributor_id)
        .await
        .map_err(AppError::Db)
}

// Shared fetch + ownership check for approve/reject/viewed.
async fn load_gift_for_decision(
    pool: &PgPool,
    actor: Uuid,
    gift_id: Uuid,
) -> Result<(Gift, Child), AppError> {
    let gift = db::gift_queries::fetch_one(pool, gift_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Gift {} not found", gift_id)))?;
    let child = db::child_queries::fetch_one(pool, gift.child_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Child {} not found", gift.child_id)))?;
    if child.parent_id != actor {
        warn!("User {} is not the custodian for gift {}", actor, gift_id);
        return Err(AppError::Forbidden);
    }
    Ok((gift, child))
}

async fn resolve_investment(
    pool: &PgPool,
    market: &MarketDataService,
    investment_id: &str,
) -> Result<Investment, AppError> {
    if let Some(symbol) = investment_id.strip_prefix(TEMP_SYMBOL_PREFIX) {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(AppError::Validation(
                "Temporary investment marker carries no symbol".to_string(),
            ));
        }
        return materialize_investment(pool, market, &symbol).await;
    }

    let id = investment_id.parse::<Uuid>().map_err(|_| {
        AppError::Validation(format!(
            "investment_id must be a UUID or a temp_<SYMBOL> marker, got '{}'",
            investment_id
        ))
    })?;
    db::investment_queries::fetch_one(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Investment {} not found", id)))
}

/// Turns a symbol into a permanent investment row using a live quote and
/// company profile. Upsert by symbol, so a concurrent materialization of the
/// same symbol just refreshes the price.
pub async fn materialize_investment(
    pool: &PgPool,
    market: &MarketDataService,
    symbol: &str,
) -> Result<Investment, AppError> {
    let quote = market.get_quote(symbol).await?;
    let name = match market.get_company_profile(symbol).await {
        Ok(profile) => profile.name,
        Err(e) => {
            warn!("No company profile for {}, using the symbol as name: {}", symbol, e);
            symbol.to_string()
        }
    };

    let investment = Investment::new(
        symbol.to_string(),
        name,
        InvestmentType::infer(symbol),
        quote.price,
        quote.ytd_return,
    );
    let stored = db::investment_queries::upsert_by_symbol(pool, investment).await?;
    info!("✓ Materialized investment {} ({})", stored.symbol, stored.id);
    Ok(stored)
}

async fn apply_gift_to_holding(
    conn: &mut PgConnection,
    gift: &Gift,
    investment: &Investment,
) -> Result<PortfolioHolding, AppError> {
    let existing =
        db::holding_queries::fetch_for_update(conn, gift.child_id, gift.investment_id).await?;

    let holding = match existing {
        Some(holding) => {
            let merged = merge_into_holding(
                &holding.shares,
                &holding.average_cost,
                &gift.shares,
                &gift.amount,
                &investment.current_price,
            )?;
            db::holding_queries::update_position(
                conn,
                holding.id,
                merged.shares,
                merged.average_cost,
                merged.current_value,
            )
            .await?
        }
        None => {
            let merged = merge_into_holding(
                &BigDecimal::from(0),
                &BigDecimal::from(0),
                &gift.shares,
                &gift.amount,
                &investment.current_price,
            )?;
            db::holding_queries::insert(
                conn,
                PortfolioHolding::new(
                    gift.child_id,
                    gift.investment_id,
                    merged.shares,
                    merged.average_cost,
                    merged.current_value,
                ),
            )
            .await?
        }
    };
    Ok(holding)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_shares_for_a_gift_come_out_at_six_decimals() {
        // $150 at $50/share buys exactly three shares.
        let shares = shares_for_amount(&dec("150"), &dec("50")).unwrap();

        assert_eq!(shares.to_string(), "3.000000");
    }

    #[test]
    fn test_fractional_shares_round_half_away_from_zero() {
        // 100 / 3 = 33.33333333... -> 33.333333
        let shares = shares_for_amount(&dec("100"), &dec("3")).unwrap();
        assert_eq!(shares.to_string(), "33.333333");

        // 0.05 / 8 = 0.00625 exactly; survives at 6 dp.
        let shares = shares_for_amount(&dec("0.05"), &dec("8")).unwrap();
        assert_eq!(shares.to_string(), "0.006250");
    }

    #[test]
    fn test_tiny_amount_against_huge_price_is_rejected() {
        // A cent of BTC at $64,250 rounds to zero shares at 6 dp.
        let err = shares_for_amount(&dec("0.01"), &dec("64250.00")).unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_zero_or_negative_price_is_rejected() {
        assert!(shares_for_amount(&dec("100"), &dec("0")).is_err());
        assert!(shares_for_amount(&dec("100"), &dec("-1")).is_err());
    }

    #[test]
    fn test_first_gift_establishes_the_basis() {
        let merged =
            merge_into_holding(&dec("0"), &dec("0"), &dec("3.000000"), &dec("150"), &dec("50"))
                .unwrap();

        assert_eq!(merged.shares.to_string(), "3.000000");
        assert_eq!(merged.average_cost.to_string(), "50.00");
        assert_eq!(merged.current_value.to_string(), "150.00");
    }

    #[test]
    fn test_second_gift_merges_into_weighted_average() {
        // 3 shares at $50, then $120 buys 2 more at $60:
        // avg = (50*3 + 120) / 5 = 54.00, value = 5 * 60 = 300.00
        let merged = merge_into_holding(
            &dec("3.000000"),
            &dec("50.00"),
            &dec("2.000000"),
            &dec("120"),
            &dec("60"),
        )
        .unwrap();

        assert_eq!(merged.shares.to_string(), "5.000000");
        assert_eq!(merged.average_cost.to_string(), "54.00");
        assert_eq!(merged.current_value.to_string(), "300.00");
    }

    #[test]
    fn test_average_cost_is_quantized_to_cents() {
        // (10.00*1 + 10) / 2 hits an exact cent; (33.33*1 + 50) / 2.5 does not.
        let merged = merge_into_holding(
            &dec("1.000000"),
            &dec("33.33"),
            &dec("1.500000"),
            &dec("50"),
            &dec("33.00"),
        )
        .unwrap();

        // (33.33 + 50) / 2.5 = 33.332 -> 33.33
        assert_eq!(merged.average_cost.to_string(), "33.33");
        assert_eq!(merged.shares.to_string(), "2.500000");
        assert_eq!(merged.current_value.to_string(), "82.50");
    }

    #[test]
    fn test_money_quantization_rounds_half_away_from_zero() {
        assert_eq!(quantize_money(&dec("10.005")).to_string(), "10.01");
        assert_eq!(quantize_money(&dec("10.004")).to_string(), "10.00");
        assert_eq!(quantize_money(&dec("-10.005")).to_string(), "-10.01");
    }

    #[test]
    fn test_long_division_results_do_not_panic_the_quantizer() {
        // 1/3 carries bigdecimal's full division precision; the quantizer
        // must cope with the width.
        let third = &dec("1") / &dec("3");

        assert_eq!(quantize_shares(&third).to_string(), "0.333333");
        assert_eq!(quantize_money(&third).to_string(), "0.33");
    }
}
