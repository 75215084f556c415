use std::sync::Arc;

use chrono::Duration;
use tracing::{error, info};

use crate::cache::TtlCache;
use crate::errors::AppError;
use crate::external::market_provider::{
    CompanyProfile, MarketDataError, MarketDataProvider, Quote, SymbolMatch,
};

pub const QUOTE_TTL_MINUTES: i64 = 5;

/// Cached gateway to the market data provider.
///
/// Quotes, searches and profiles each get their own TTL cache so one noisy
/// gift page cannot burn through the provider's rate limit. Within a TTL
/// window a key hits the provider at most once; whatever the provider chain
/// answers (including mock fallback data) is what every caller sees until
/// the window lapses.
#[derive(Clone)]
pub struct MarketDataService {
    provider: Arc<dyn MarketDataProvider>,
    quotes: TtlCache<Quote>,
    searches: TtlCache<Vec<SymbolMatch>>,
    profiles: TtlCache<CompanyProfile>,
}

impl MarketDataService {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self::with_ttl(provider, Duration::minutes(QUOTE_TTL_MINUTES))
    }

    pub fn with_ttl(provider: Arc<dyn MarketDataProvider>, ttl: Duration) -> Self {
        Self {
            provider,
            quotes: TtlCache::new(ttl),
            searches: TtlCache::new(ttl),
            profiles: TtlCache::new(ttl),
        }
    }

    pub async fn get_quote(&self, symbol: &str) -> Result<Quote, AppError> {
        let key = symbol.trim().to_uppercase();
        if key.is_empty() {
            return Err(AppError::Validation("Symbol must not be empty".to_string()));
        }

        if let Some(quote) = self.quotes.get(&key) {
            return Ok(quote);
        }

        match self.provider.fetch_quote(&key).await {
            Ok(quote) => {
                info!("📊 Fetched quote for {} from {}", key, self.provider.name());
                self.quotes.set(&key, quote.clone());
                Ok(quote)
            }
            Err(e) => Err(map_market_error(e, &key)),
        }
    }

    pub async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolMatch>, AppError> {
        let key = query.trim().to_lowercase();
        if key.is_empty() {
            return Err(AppError::Validation("Search query must not be empty".to_string()));
        }

        if let Some(matches) = self.searches.get(&key) {
            return Ok(matches);
        }

        match self.provider.search_symbols(&key).await {
            Ok(matches) => {
                self.searches.set(&key, matches.clone());
                Ok(matches)
            }
            Err(e) => Err(map_market_error(e, &key)),
        }
    }

    pub async fn get_company_profile(&self, symbol: &str) -> Result<CompanyProfile, AppError> {
        let key = symbol.trim().to_uppercase();
        if key.is_empty() {
            return Err(AppError::Validation("Symbol must not be empty".to_string()));
        }

        if let Some(profile) = self.profiles.get(&key) {
            return Ok(profile);
        }

        match self.provider.fetch_company_profile(&key).await {
            Ok(profile) => {
                self.profiles.set(&key, profile.clone());
                Ok(profile)
            }
            Err(e) => Err(map_market_error(e, &key)),
        }
    }

    /// Sweeps lapsed entries out of all three caches. Run periodically; reads
    /// never return stale data either way.
    pub fn cleanup_expired(&self) {
        self.quotes.cleanup_expired();
        self.searches.cleanup_expired();
        self.profiles.cleanup_expired();
    }
}

fn map_market_error(e: MarketDataError, key: &str) -> AppError {
    match e {
        MarketDataError::UnknownSymbol(symbol) => {
            AppError::NotFound(format!("Unknown symbol: {}", symbol))
        }
        other => {
            error!("Market data lookup failed for {}: {}", key, other);
            AppError::External(other.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use bigdecimal::BigDecimal;

    use super::*;

    struct CountingProvider {
        calls: AtomicUsize,
    }

    impl CountingProvider {
        fn new() -> Self {
            Self { calls: AtomicUsize::new(0) }
        }

        fn quote(symbol: &str) -> Quote {
            Quote {
                symbol: symbol.to_string(),
                price: "50.00".parse::<BigDecimal>().unwrap(),
                change: None,
                percent_change: None,
                previous_close: None,
                ytd_return: None,
            }
        }
    }

    #[async_trait]
    impl MarketDataProvider for CountingProvider {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn fetch_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Self::quote(symbol))
        }

        async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolMatch>, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![SymbolMatch {
                symbol: query.to_uppercase(),
                description: "Test Security".to_string(),
                security_type: "Common Stock".to_string(),
            }])
        }

        async fn fetch_company_profile(
            &self,
            symbol: &str,
        ) -> Result<CompanyProfile, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(CompanyProfile {
                symbol: symbol.to_string(),
                name: "Test Security".to_string(),
                exchange: None,
                industry: None,
                logo: None,
                weburl: None,
                currency: None,
            })
        }
    }

    #[tokio::test]
    async fn test_second_quote_within_ttl_does_not_hit_provider() {
        let provider = Arc::new(CountingProvider::new());
        let service = MarketDataService::new(provider.clone());

        let first = service.get_quote("AAPL").await.unwrap();
        let second = service.get_quote("AAPL").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_quote_keys_are_case_insensitive() {
        let provider = Arc::new(CountingProvider::new());
        let service = MarketDataService::new(provider.clone());

        service.get_quote("aapl").await.unwrap();
        service.get_quote(" AAPL ").await.unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_quote_is_refetched() {
        let provider = Arc::new(CountingProvider::new());
        let service = MarketDataService::with_ttl(provider.clone(), Duration::zero());

        service.get_quote("AAPL").await.unwrap();
        service.get_quote("AAPL").await.unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_distinct_symbols_fetch_separately() {
        let provider = Arc::new(CountingProvider::new());
        let service = MarketDataService::new(provider.clone());

        service.get_quote("AAPL").await.unwrap();
        service.get_quote("MSFT").await.unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_searches_are_cached_by_normalized_query() {
        let provider = Arc::new(CountingProvider::new());
        let service = MarketDataService::new(provider.clone());

        service.search_symbols("Apple").await.unwrap();
        service.search_symbols("  apple ").await.unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_symbol_is_a_validation_error() {
        let provider = Arc::new(CountingProvider::new());
        let service = MarketDataService::new(provider);

        let err = service.get_quote("  ").await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }
}
