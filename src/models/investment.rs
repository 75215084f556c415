use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentType {
    Stock,
    Etf,
    Crypto,
}

impl InvestmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentType::Stock => "stock",
            InvestmentType::Etf => "etf",
            InvestmentType::Crypto => "crypto",
        }
    }

    /// Best-effort classification for symbols materialized from search
    /// results, where the provider does not tell us the security type.
    pub fn infer(symbol: &str) -> Self {
        let upper = symbol.to_uppercase();
        const CRYPTO: &[&str] = &["BTC", "ETH", "SOL", "DOGE", "ADA"];
        const ETFS: &[&str] = &["SPY", "VOO", "VTI", "QQQ", "IVV", "SCHB", "VT", "DIA"];

        if CRYPTO.contains(&upper.as_str()) {
            InvestmentType::Crypto
        } else if ETFS.contains(&upper.as_str()) || upper.ends_with("ETF") {
            InvestmentType::Etf
        } else {
            InvestmentType::Stock
        }
    }

    /// Maps a provider security-type label ("Common Stock", "ETP", "Crypto")
    /// onto our three buckets, falling back to the symbol heuristic.
    pub fn from_security_type(security_type: &str, symbol: &str) -> Self {
        let label = security_type.to_lowercase();
        if label.contains("etf") || label.contains("etp") {
            InvestmentType::Etf
        } else if label.contains("crypto") {
            InvestmentType::Crypto
        } else if label.contains("stock") || label.contains("equity") {
            InvestmentType::Stock
        } else {
            Self::infer(symbol)
        }
    }
}

// A purchasable security, upserted by symbol. current_price is the last quote
// we saw for it; updated_at says how stale that is.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Investment {
    pub id: uuid::Uuid,
    pub symbol: String,
    pub name: String,
    pub investment_type: String,
    pub current_price: BigDecimal,
    pub ytd_return: Option<BigDecimal>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// Search row for the gift page. investment_id is a UUID string for symbols
// we already track, or a `temp_<SYMBOL>` marker for ones we would
// materialize on first gift.
#[derive(Debug, Clone, Serialize)]
pub struct InvestmentSearchResult {
    pub investment_id: String,
    pub symbol: String,
    pub name: String,
    pub investment_type: String,
    pub current_price: Option<BigDecimal>,
}

impl Investment {
    pub fn new(
        symbol: String,
        name: String,
        investment_type: InvestmentType,
        current_price: BigDecimal,
        ytd_return: Option<BigDecimal>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            symbol,
            name,
            investment_type: investment_type.as_str().to_string(),
            current_price,
            ytd_return,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infers_crypto_and_etf_symbols() {
        assert_eq!(InvestmentType::infer("BTC"), InvestmentType::Crypto);
        assert_eq!(InvestmentType::infer("eth"), InvestmentType::Crypto);
        assert_eq!(InvestmentType::infer("SPY"), InvestmentType::Etf);
        assert_eq!(InvestmentType::infer("vti"), InvestmentType::Etf);
        assert_eq!(InvestmentType::infer("AAPL"), InvestmentType::Stock);
    }

    #[test]
    fn test_provider_labels_win_over_the_heuristic() {
        assert_eq!(
            InvestmentType::from_security_type("ETP", "AAPL"),
            InvestmentType::Etf
        );
        assert_eq!(
            InvestmentType::from_security_type("Common Stock", "SPY"),
            InvestmentType::Stock
        );
        assert_eq!(
            InvestmentType::from_security_type("", "SPY"),
            InvestmentType::Etf
        );
    }
}
