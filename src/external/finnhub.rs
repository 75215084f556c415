use async_trait::async_trait;
use bigdecimal::BigDecimal;
use serde::Deserialize;

use crate::external::market_provider::{
    CompanyProfile, MarketDataError, MarketDataProvider, Quote, SymbolMatch,
};

const BASE_URL: &str = "https://finnhub.io/api/v1";

pub struct FinnhubProvider {
    client: reqwest::Client,
    api_key: String,
}

impl FinnhubProvider {
    pub fn from_env() -> Result<Self, MarketDataError> {
        let api_key = std::env::var("FINNHUB_API_KEY")
            .map_err(|_| MarketDataError::BadResponse("FINNHUB_API_KEY not set".into()))?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, MarketDataError> {
        let url = format!("{}{}", BASE_URL, path);

        let resp = self
            .client
            .get(&url)
            .query(query)
            .query(&[("token", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| MarketDataError::Network(e.to_string()))?;

        // Finnhub throttles with a plain 429
        if resp.status().as_u16() == 429 {
            return Err(MarketDataError::RateLimited);
        }
        if !resp.status().is_success() {
            return Err(MarketDataError::BadResponse(format!(
                "HTTP {} from {}",
                resp.status(),
                path
            )));
        }

        resp.json::<T>()
            .await
            .map_err(|e| MarketDataError::Parse(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct FinnhubQuote {
    /// Current price; 0 for symbols Finnhub does not know.
    c: f64,
    d: Option<f64>,
    dp: Option<f64>,
    pc: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct FinnhubSearchResponse {
    #[serde(default)]
    result: Vec<FinnhubSearchMatch>,
}

#[derive(Debug, Deserialize)]
struct FinnhubSearchMatch {
    symbol: String,
    description: String,
    #[serde(rename = "type", default)]
    security_type: String,
}

#[derive(Debug, Deserialize)]
struct FinnhubProfile {
    // Finnhub returns an empty object for unknown symbols
    name: Option<String>,
    ticker: Option<String>,
    exchange: Option<String>,
    #[serde(rename = "finnhubIndustry")]
    industry: Option<String>,
    logo: Option<String>,
    weburl: Option<String>,
    currency: Option<String>,
}

fn decimal(value: f64) -> Result<BigDecimal, MarketDataError> {
    value
        .to_string()
        .parse::<BigDecimal>()
        .map_err(|e| MarketDataError::Parse(e.to_string()))
}

fn optional_decimal(value: Option<f64>) -> Result<Option<BigDecimal>, MarketDataError> {
    value.map(decimal).transpose()
}

#[async_trait]
impl MarketDataProvider for FinnhubProvider {
    fn name(&self) -> &'static str {
        "finnhub"
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let body: FinnhubQuote = self.get_json("/quote", &[("symbol", symbol)]).await?;

        if body.c == 0.0 {
            return Err(MarketDataError::UnknownSymbol(symbol.to_string()));
        }

        Ok(Quote {
            symbol: symbol.to_string(),
            price: decimal(body.c)?,
            change: optional_decimal(body.d)?,
            percent_change: optional_decimal(body.dp)?,
            previous_close: optional_decimal(body.pc)?,
            ytd_return: None,
        })
    }

    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolMatch>, MarketDataError> {
        let body: FinnhubSearchResponse = self.get_json("/search", &[("q", query)]).await?;

        Ok(body
            .result
            .into_iter()
            .map(|m| SymbolMatch {
                symbol: m.symbol,
                description: m.description,
                security_type: m.security_type,
            })
            .collect())
    }

    async fn fetch_company_profile(
        &self,
        symbol: &str,
    ) -> Result<CompanyProfile, MarketDataError> {
        let body: FinnhubProfile = self
            .get_json("/stock/profile2", &[("symbol", symbol)])
            .await?;

        let name = body
            .name
            .ok_or_else(|| MarketDataError::UnknownSymbol(symbol.to_string()))?;

        Ok(CompanyProfile {
            symbol: body.ticker.unwrap_or_else(|| symbol.to_string()),
            name,
            exchange: body.exchange,
            industry: body.industry,
            logo: body.logo,
            weburl: body.weburl,
            currency: body.currency,
        })
    }
}
