use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use super::simulation_model::{ProfitSimulationResult, SimulatedPosition, SimulationPosition};
use crate::errors::{Error, Result};
use crate::portfolio::calculator;
use crate::quotes::PriceAggregator;
use crate::values::Symbol;

/// Trait for profit simulation operations
#[async_trait]
pub trait ProfitSimulationServiceTrait: Send + Sync {
    async fn simulate_profit(
        &self,
        positions: Vec<SimulationPosition>,
    ) -> Result<ProfitSimulationResult>;
}

pub struct ProfitSimulationService {
    price_aggregator: Arc<PriceAggregator>,
}

impl ProfitSimulationService {
    pub fn new(price_aggregator: Arc<PriceAggregator>) -> Self {
        Self { price_aggregator }
    }
}

#[async_trait]
impl ProfitSimulationServiceTrait for ProfitSimulationService {
    async fn simulate_profit(
        &self,
        positions: Vec<SimulationPosition>,
    ) -> Result<ProfitSimulationResult> {
        if positions.is_empty() {
            return Ok(ProfitSimulationResult::empty());
        }

        if let Some(invalid) = positions
            .iter()
            .find(|p| !calculator::is_valid_simulation_input(p.quantity, p.original_value))
        {
            return Err(Error::InvalidSimulationInput(format!(
                "{}: quantity {} and value {} must both be positive",
                invalid.symbol, invalid.quantity, invalid.original_value
            )));
        }

        let symbols: Vec<Symbol> = positions.iter().map(|p| p.symbol.clone()).collect();
        let prices = self.price_aggregator.fetch_many(&symbols).await;

        let mut simulated = Vec::with_capacity(positions.len());
        let mut performance: BTreeMap<Symbol, Decimal> = BTreeMap::new();
        for position in positions {
            let Some(current_price) = prices.get(&position.symbol).copied() else {
                debug!("No current price for {}, leaving it out", position.symbol);
                continue;
            };

            let current_value = calculator::current_value(position.quantity, current_price)?;
            let original_price =
                calculator::price_per_unit(position.original_value, position.quantity)?;
            let percent = calculator::profit_loss_percent(original_price, current_price)?;

            performance.insert(position.symbol.clone(), percent);
            simulated.push(SimulatedPosition {
                symbol: position.symbol,
                quantity: position.quantity,
                original_price,
                current_price,
                current_value,
                profit_loss_percent: percent,
            });
        }

        let total_current_value =
            calculator::total_portfolio_value(simulated.iter().map(|p| p.current_value))?;
        let best = calculator::best_performing(&performance);
        let worst = calculator::worst_performing(&performance);

        Ok(ProfitSimulationResult {
            total_current_value,
            best_performance: best.as_ref().map(|(_, p)| *p).unwrap_or(Decimal::ZERO),
            best_asset: best.map(|(s, _)| s),
            worst_performance: worst.as_ref().map(|(_, p)| *p).unwrap_or(Decimal::ZERO),
            worst_asset: worst.map(|(s, _)| s),
            positions: simulated,
        })
    }
}
