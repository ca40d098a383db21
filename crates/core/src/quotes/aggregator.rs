//! Batched, failure-tolerant price lookups against a [`QuoteSource`].

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use cryptowallet_market_data::{MarketDataError, QuoteSource};
use futures::future::join_all;
use log::{debug, info, warn};

use crate::constants::PRICE_FETCH_BATCH_SIZE;
use crate::values::{Money, Symbol};

/// Fetches current prices with bounded concurrency.
///
/// Symbols are requested in rounds of `batch_size`; the requests of one round
/// run concurrently and the next round starts only once all of them have
/// finished. A failed or empty answer for one symbol never affects the others.
pub struct PriceAggregator {
    source: Arc<dyn QuoteSource>,
    batch_size: usize,
}

impl PriceAggregator {
    pub fn new(source: Arc<dyn QuoteSource>) -> Self {
        Self {
            source,
            batch_size: PRICE_FETCH_BATCH_SIZE,
        }
    }

    /// Override the round size (values below 1 are treated as 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Current price of one symbol, or `None` when the source has none.
    pub async fn fetch_one(&self, symbol: &Symbol) -> Option<Money> {
        match self.source.get_quote(symbol.as_str()).await {
            Ok(quote) => match Money::new(quote.price) {
                Ok(price) => Some(price),
                Err(e) => {
                    warn!(
                        "Discarding price {} for {} from {}: {}",
                        quote.price,
                        symbol,
                        self.source.id(),
                        e
                    );
                    None
                }
            },
            Err(MarketDataError::SymbolNotFound(_)) => {
                debug!("No price for {} from {}", symbol, self.source.id());
                None
            }
            Err(e) if e.is_transient() => {
                debug!(
                    "Skipping {} this round, {} is unavailable: {}",
                    symbol,
                    self.source.id(),
                    e
                );
                None
            }
            Err(e) => {
                warn!(
                    "Failed to fetch price for symbol {} from {}: {}",
                    symbol,
                    self.source.id(),
                    e
                );
                None
            }
        }
    }

    /// Prices for every symbol the source could price. Missing symbols are
    /// simply absent from the map. Duplicates are fetched once.
    pub async fn fetch_many(&self, symbols: &[Symbol]) -> HashMap<Symbol, Money> {
        if symbols.is_empty() {
            return HashMap::new();
        }

        let mut seen = HashSet::with_capacity(symbols.len());
        let unique: Vec<&Symbol> = symbols.iter().filter(|s| seen.insert(*s)).collect();

        info!(
            "Fetching prices for {} symbols from {}",
            unique.len(),
            self.source.id()
        );

        let mut prices = HashMap::with_capacity(unique.len());
        for batch in unique.chunks(self.batch_size) {
            let futures = batch.iter().map(|symbol| async move {
                let price = self.fetch_one(symbol).await;
                (*symbol, price)
            });

            for (symbol, price) in join_all(futures).await {
                if let Some(price) = price {
                    prices.insert(symbol.clone(), price);
                }
            }
        }

        debug!("Priced {} of {} symbols", prices.len(), unique.len());
        prices
    }

    /// A symbol is supported when the source currently prices it.
    pub async fn is_valid_symbol(&self, symbol: &Symbol) -> bool {
        self.fetch_one(symbol).await.is_some()
    }
}
