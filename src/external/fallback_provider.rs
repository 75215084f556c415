use async_trait::async_trait;
use tracing::{info, warn};

use crate::external::market_provider::{
    CompanyProfile, MarketDataError, MarketDataProvider, Quote, SymbolMatch,
};

/// Routes every call to the primary provider and falls back to a second one
/// when the primary errors out or is rate limited.
///
/// In the default deployment the fallback is [`MockMarketData`], so quotes and
/// search keep answering even without a Finnhub key or network access.
///
/// [`MockMarketData`]: crate::external::mock::MockMarketData
pub struct FallbackProvider {
    primary: Box<dyn MarketDataProvider>,
    fallback: Box<dyn MarketDataProvider>,
}

impl FallbackProvider {
    pub fn new(primary: Box<dyn MarketDataProvider>, fallback: Box<dyn MarketDataProvider>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl MarketDataProvider for FallbackProvider {
    fn name(&self) -> &'static str {
        "multi"
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        match self.primary.fetch_quote(symbol).await {
            Ok(quote) => {
                info!("✓ Quote for {} from {}", symbol, self.primary.name());
                return Ok(quote);
            }
            Err(MarketDataError::RateLimited) => {
                info!("⚠️ {} rate limited, trying {}", self.primary.name(), self.fallback.name());
            }
            Err(e) => {
                warn!("{} quote failed for {}: {}", self.primary.name(), symbol, e);
            }
        }

        self.fallback.fetch_quote(symbol).await
    }

    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolMatch>, MarketDataError> {
        match self.primary.search_symbols(query).await {
            Ok(matches) if !matches.is_empty() => {
                return Ok(matches);
            }
            Ok(_) => {
                info!("No results from {} for '{}', trying {}", self.primary.name(), query, self.fallback.name());
            }
            Err(e) => {
                warn!("{} search failed for '{}': {}", self.primary.name(), query, e);
            }
        }

        self.fallback.search_symbols(query).await
    }

    async fn fetch_company_profile(
        &self,
        symbol: &str,
    ) -> Result<CompanyProfile, MarketDataError> {
        match self.primary.fetch_company_profile(symbol).await {
            Ok(profile) => {
                return Ok(profile);
            }
            Err(MarketDataError::RateLimited) => {
                info!("⚠️ {} rate limited, trying {}", self.primary.name(), self.fallback.name());
            }
            Err(e) => {
                warn!("{} profile failed for {}: {}", self.primary.name(), symbol, e);
            }
        }

        self.fallback.fetch_company_profile(symbol).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::external::mock::MockMarketData;

    struct BrokenProvider {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl MarketDataProvider for BrokenProvider {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn fetch_quote(&self, _symbol: &str) -> Result<Quote, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(MarketDataError::Network("connection refused".to_string()))
        }

        async fn search_symbols(&self, _query: &str) -> Result<Vec<SymbolMatch>, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn fetch_company_profile(
            &self,
            _symbol: &str,
        ) -> Result<CompanyProfile, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(MarketDataError::RateLimited)
        }
    }

    #[tokio::test]
    async fn test_falls_back_to_mock_when_primary_errors() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = FallbackProvider::new(
            Box::new(BrokenProvider { calls: Arc::clone(&calls) }),
            Box::new(MockMarketData::new()),
        );

        let quote = provider.fetch_quote("AAPL").await.unwrap();

        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_primary_search_falls_back() {
        let provider = FallbackProvider::new(
            Box::new(BrokenProvider { calls: Arc::new(AtomicUsize::new(0)) }),
            Box::new(MockMarketData::new()),
        );

        let matches = provider.search_symbols("apple").await.unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].symbol, "AAPL");
    }

    #[tokio::test]
    async fn test_rate_limited_profile_falls_back() {
        let provider = FallbackProvider::new(
            Box::new(BrokenProvider { calls: Arc::new(AtomicUsize::new(0)) }),
            Box::new(MockMarketData::new()),
        );

        let profile = provider.fetch_company_profile("TSLA").await.unwrap();

        assert_eq!(profile.name, "Tesla Inc");
    }
}
