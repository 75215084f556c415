pub mod fallback_provider;
pub mod finnhub;
pub mod market_provider;
pub mod mock;
