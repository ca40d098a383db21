//! CoinCap provider for cryptocurrency spot prices.
//!
//! Prices are read from the `/price/bysymbol/{SYMBOL}` endpoint, which answers
//! with a millisecond timestamp and a list of decimal strings. Only the first
//! entry is used.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::QuoteSource;

/// Provider ID constant
const PROVIDER_ID: &str = "COINCAP";

/// Public API root used when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://rest.coincap.io/v3";

const PRICE_ENDPOINT: &str = "/price/bysymbol/";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Response body of the price-by-symbol endpoint.
#[derive(Debug, Deserialize)]
struct PriceResponse {
    /// Unix timestamp of the quote, in milliseconds
    #[serde(default)]
    timestamp: Option<i64>,
    #[serde(default)]
    data: Vec<Option<String>>,
}

/// CoinCap REST provider.
///
/// # Example
///
/// ```ignore
/// use cryptowallet_market_data::provider::coincap::CoinCapProvider;
///
/// let provider = CoinCapProvider::new(Some("your_api_key".to_string()))
///     .with_base_url("https://rest.coincap.io/v3");
/// ```
pub struct CoinCapProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinCapProvider {
    /// Create a provider against the public API. The key is sent as a bearer token.
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_timeout(api_key, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(api_key: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Point the provider at another API root (mirrors, local stubs).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn price_url(&self, symbol: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url,
            PRICE_ENDPOINT,
            symbol.to_uppercase()
        )
    }

    /// Turn a decoded response into a quote.
    fn parse_response(symbol: &str, response: PriceResponse) -> Result<Quote, MarketDataError> {
        let raw = response
            .data
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        let price = Decimal::from_str(raw.trim())
            .or_else(|_| Decimal::from_scientific(raw.trim()))
            .map_err(|e| MarketDataError::InvalidResponse {
                provider: PROVIDER_ID.to_string(),
                message: format!("unparsable price '{}': {}", raw, e),
            })?;

        let timestamp = response
            .timestamp
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .unwrap_or_else(Utc::now);

        Ok(Quote::new(
            symbol.to_uppercase(),
            price,
            timestamp,
            PROVIDER_ID.to_string(),
        ))
    }

    fn status_error(symbol: &str, status: StatusCode) -> MarketDataError {
        match status {
            StatusCode::NOT_FOUND => MarketDataError::SymbolNotFound(symbol.to_string()),
            StatusCode::TOO_MANY_REQUESTS => MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            },
            other => MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", other),
            },
        }
    }
}

#[async_trait]
impl QuoteSource for CoinCapProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let url = self.price_url(symbol);
        debug!("Requesting {} price from {}", symbol, PROVIDER_ID);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::Network(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(symbol, status));
        }

        let body: PriceResponse =
            response
                .json()
                .await
                .map_err(|e| MarketDataError::InvalidResponse {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                })?;

        Self::parse_response(symbol, body)
    }
}
