use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::aggregator::PriceAggregator;
use crate::errors::Result;
use crate::values::Symbol;
use crate::wallets::AssetRepositoryTrait;

/// Trait for the periodic price refresh job
#[async_trait]
pub trait PriceRefreshServiceTrait: Send + Sync {
    /// Re-price every held symbol. Returns how many symbols got a price.
    async fn refresh_all_prices(&self) -> Result<usize>;
}

/// Overwrites stored asset prices with current market prices.
pub struct PriceRefreshService {
    asset_repository: Arc<dyn AssetRepositoryTrait>,
    price_aggregator: Arc<PriceAggregator>,
}

impl PriceRefreshService {
    pub fn new(
        asset_repository: Arc<dyn AssetRepositoryTrait>,
        price_aggregator: Arc<PriceAggregator>,
    ) -> Self {
        Self {
            asset_repository,
            price_aggregator,
        }
    }
}

#[async_trait]
impl PriceRefreshServiceTrait for PriceRefreshService {
    async fn refresh_all_prices(&self) -> Result<usize> {
        let symbols: Vec<Symbol> = self
            .asset_repository
            .list_distinct_symbols()?
            .into_iter()
            .collect();

        if symbols.is_empty() {
            info!("No held symbols, skipping price refresh");
            return Ok(0);
        }

        let prices = self.price_aggregator.fetch_many(&symbols).await;
        let priced = prices.len();
        if priced == 0 {
            info!("Price refresh found no prices for {} symbols", symbols.len());
            return Ok(0);
        }

        let rows = self.asset_repository.bulk_update_prices(prices).await?;
        debug!("Price refresh updated {} asset rows", rows);
        info!(
            "Price refresh completed: {} of {} symbols priced",
            priced,
            symbols.len()
        );
        Ok(priced)
    }
}
