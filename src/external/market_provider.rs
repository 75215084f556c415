use async_trait::async_trait;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Point-in-time price snapshot for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    pub symbol: String,
    pub price: BigDecimal,
    pub change: Option<BigDecimal>,
    pub percent_change: Option<BigDecimal>,
    pub previous_close: Option<BigDecimal>,
    pub ytd_return: Option<BigDecimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymbolMatch {
    pub symbol: String,
    pub description: String,
    pub security_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyProfile {
    pub symbol: String,
    pub name: String,
    pub exchange: Option<String>,
    pub industry: Option<String>,
    pub logo: Option<String>,
    pub weburl: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("rate limited")]
    RateLimited,

    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;

    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolMatch>, MarketDataError>;

    async fn fetch_company_profile(&self, symbol: &str)
        -> Result<CompanyProfile, MarketDataError>;
}
