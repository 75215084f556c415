use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::external::market_provider::{
    CompanyProfile, MarketDataError, MarketDataProvider, Quote, SymbolMatch,
};

/// Deterministic market data for well-known tickers.
///
/// This backs the system when no provider credentials are configured and
/// catches provider failures, so the gift flow keeps working offline. It is
/// not a resilience layer; the table is intentionally tiny.
pub struct MockMarketData;

struct MockTicker {
    symbol: &'static str,
    name: &'static str,
    security_type: &'static str,
    price: &'static str,
    ytd_return: &'static str,
}

const TICKERS: &[MockTicker] = &[
    MockTicker { symbol: "AAPL", name: "Apple Inc", security_type: "Common Stock", price: "227.52", ytd_return: "18.40" },
    MockTicker { symbol: "GOOGL", name: "Alphabet Inc", security_type: "Common Stock", price: "192.60", ytd_return: "24.10" },
    MockTicker { symbol: "MSFT", name: "Microsoft Corporation", security_type: "Common Stock", price: "448.90", ytd_return: "15.75" },
    MockTicker { symbol: "AMZN", name: "Amazon.com Inc", security_type: "Common Stock", price: "231.44", ytd_return: "21.30" },
    MockTicker { symbol: "TSLA", name: "Tesla Inc", security_type: "Common Stock", price: "329.80", ytd_return: "32.60" },
    MockTicker { symbol: "DIS", name: "The Walt Disney Company", security_type: "Common Stock", price: "112.35", ytd_return: "3.20" },
    MockTicker { symbol: "NKE", name: "Nike Inc", security_type: "Common Stock", price: "78.12", ytd_return: "-12.45" },
    MockTicker { symbol: "RBLX", name: "Roblox Corporation", security_type: "Common Stock", price: "52.84", ytd_return: "29.90" },
    MockTicker { symbol: "SPY", name: "SPDR S&P 500 ETF Trust", security_type: "ETP", price: "563.70", ytd_return: "17.20" },
    MockTicker { symbol: "VTI", name: "Vanguard Total Stock Market ETF", security_type: "ETP", price: "278.34", ytd_return: "16.85" },
    MockTicker { symbol: "QQQ", name: "Invesco QQQ Trust", security_type: "ETP", price: "495.10", ytd_return: "19.50" },
    MockTicker { symbol: "BTC", name: "Bitcoin", security_type: "Crypto", price: "64250.00", ytd_return: "48.70" },
    MockTicker { symbol: "ETH", name: "Ethereum", security_type: "Crypto", price: "3180.00", ytd_return: "35.20" },
];

impl MockMarketData {
    pub fn new() -> Self {
        Self
    }

    fn lookup(symbol: &str) -> Option<&'static MockTicker> {
        let wanted = symbol.to_uppercase();
        TICKERS.iter().find(|t| t.symbol == wanted)
    }
}

impl Default for MockMarketData {
    fn default() -> Self {
        Self::new()
    }
}

fn table_decimal(value: &str) -> BigDecimal {
    value.parse().expect("mock table holds valid decimals")
}

#[async_trait]
impl MarketDataProvider for MockMarketData {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let ticker = Self::lookup(symbol)
            .ok_or_else(|| MarketDataError::UnknownSymbol(symbol.to_string()))?;

        Ok(Quote {
            symbol: ticker.symbol.to_string(),
            price: table_decimal(ticker.price),
            change: None,
            percent_change: None,
            previous_close: None,
            ytd_return: Some(table_decimal(ticker.ytd_return)),
        })
    }

    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolMatch>, MarketDataError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        Ok(TICKERS
            .iter()
            .filter(|t| {
                t.symbol.to_lowercase().contains(&needle)
                    || t.name.to_lowercase().contains(&needle)
            })
            .map(|t| SymbolMatch {
                symbol: t.symbol.to_string(),
                description: t.name.to_string(),
                security_type: t.security_type.to_string(),
            })
            .collect())
    }

    async fn fetch_company_profile(
        &self,
        symbol: &str,
    ) -> Result<CompanyProfile, MarketDataError> {
        let ticker = Self::lookup(symbol)
            .ok_or_else(|| MarketDataError::UnknownSymbol(symbol.to_string()))?;

        Ok(CompanyProfile {
            symbol: ticker.symbol.to_string(),
            name: ticker.name.to_string(),
            exchange: None,
            industry: None,
            logo: None,
            weburl: None,
            currency: Some("USD".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_quote_for_known_ticker_is_deterministic() {
        let mock = MockMarketData::new();

        let first = mock.fetch_quote("AAPL").await.unwrap();
        let second = mock.fetch_quote("aapl").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.symbol, "AAPL");
        assert_eq!(first.price, "227.52".parse().unwrap());
    }

    #[tokio::test]
    async fn test_unknown_ticker_is_rejected() {
        let mock = MockMarketData::new();

        let err = mock.fetch_quote("ZZZZ").await.unwrap_err();

        assert!(matches!(err, MarketDataError::UnknownSymbol(_)));
    }

    #[tokio::test]
    async fn test_search_matches_symbol_and_name() {
        let mock = MockMarketData::new();

        let by_symbol = mock.search_symbols("msf").await.unwrap();
        assert_eq!(by_symbol.len(), 1);
        assert_eq!(by_symbol[0].symbol, "MSFT");

        let by_name = mock.search_symbols("disney").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].symbol, "DIS");
    }

    #[tokio::test]
    async fn test_blank_search_returns_nothing() {
        let mock = MockMarketData::new();

        assert!(mock.search_symbols("   ").await.unwrap().is_empty());
    }
}
