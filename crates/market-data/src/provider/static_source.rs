//! Fixed, in-memory quote source.
//!
//! Used for local runs without network access and for exercising the
//! valuation engine end to end in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::QuoteSource;

const PROVIDER_ID: &str = "STATIC";

#[derive(Debug, Clone, Default)]
pub struct StaticQuoteSource {
    prices: HashMap<String, Decimal>,
}

impl StaticQuoteSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the price for a symbol (case-insensitive).
    pub fn with_price(mut self, symbol: &str, price: Decimal) -> Self {
        self.prices.insert(symbol.trim().to_uppercase(), price);
        self
    }

    pub fn from_prices<I, S>(prices: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: AsRef<str>,
    {
        prices
            .into_iter()
            .fold(Self::new(), |source, (symbol, price)| {
                source.with_price(symbol.as_ref(), price)
            })
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[async_trait]
impl QuoteSource for StaticQuoteSource {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let key = symbol.trim().to_uppercase();
        let price = self
            .prices
            .get(&key)
            .copied()
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        Ok(Quote::new(key, price, Utc::now(), PROVIDER_ID.to_string()))
    }
}
