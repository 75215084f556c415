use std::collections::HashMap;

use sqlx::PgPool;
use tracing::warn;

use crate::db;
use crate::errors::AppError;
use crate::external::market_provider::Quote;
use crate::models::{Investment, InvestmentSearchResult, InvestmentType};
use crate::services::gift_service::TEMP_SYMBOL_PREFIX;
use crate::services::market_data::MarketDataService;

pub async fn list(pool: &PgPool) -> Result<Vec<Investment>, AppError> {
    db::investment_queries::fetch_all(pool).await.map_err(AppError::Db)
}

/// Market search merged with our own investments table: symbols we already
/// track answer with their UUID and stored price, everything else gets the
/// `temp_<SYMBOL>` marker the gift flow knows how to materialize.
pub async fn search(
    pool: &PgPool,
    market: &MarketDataService,
    query: &str,
) -> Result<Vec<InvestmentSearchResult>, AppError> {
    let matches = market.search_symbols(query).await?;

    let symbols: Vec<String> = matches.iter().map(|m| m.symbol.to_uppercase()).collect();
    let known: HashMap<String, Investment> = db::investment_queries::fetch_by_symbols(pool, &symbols)
        .await?
        .into_iter()
        .map(|inv| (inv.symbol.clone(), inv))
        .collect();

    let mut results = Vec::with_capacity(matches.len());
    let mut seen = std::collections::HashSet::new();
    for m in matches {
        let symbol = m.symbol.to_uppercase();
        if !seen.insert(symbol.clone()) {
            continue;
        }
        match known.get(&symbol) {
            Some(inv) => results.push(InvestmentSearchResult {
                investment_id: inv.id.to_string(),
                symbol: inv.symbol.clone(),
                name: inv.name.clone(),
                investment_type: inv.investment_type.clone(),
                current_price: Some(inv.current_price.clone()),
            }),
            None => results.push(InvestmentSearchResult {
                investment_id: format!("{}{}", TEMP_SYMBOL_PREFIX, symbol),
                symbol: symbol.clone(),
                name: m.description,
                investment_type: InvestmentType::from_security_type(&m.security_type, &symbol)
                    .as_str()
                    .to_string(),
                current_price: None,
            }),
        }
    }
    Ok(results)
}

/// Cached quote for a symbol. When the symbol is materialized, the stored
/// price rides along opportunistically; a failed write never fails the read.
pub async fn quote(
    pool: &PgPool,
    market: &MarketDataService,
    symbol: &str,
) -> Result<Quote, AppError> {
    let quote = market.get_quote(symbol).await?;

    if let Some(investment) = db::investment_queries::fetch_by_symbol(pool, &quote.symbol).await? {
        if let Err(e) = db::investment_queries::update_price(
            pool,
            investment.id,
            quote.price.clone(),
            quote.ytd_return.clone(),
        )
        .await
        {
            warn!("Failed to refresh stored price for {}: {}", quote.symbol, e);
        }
    }

    Ok(quote)
}
