use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::values::{Money, Quantity, Symbol};

/// A position to simulate: `quantity` units bought for `original_value` in total.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationPosition {
    pub symbol: Symbol,
    pub quantity: Quantity,
    pub original_value: Money,
}

impl SimulationPosition {
    pub fn new(symbol: Symbol, quantity: Quantity, original_value: Money) -> Self {
        Self {
            symbol,
            quantity,
            original_value,
        }
    }
}

/// Outcome for one priced position.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedPosition {
    pub symbol: Symbol,
    pub quantity: Quantity,
    pub original_price: Money,
    pub current_price: Money,
    pub current_value: Money,
    pub profit_loss_percent: Decimal,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfitSimulationResult {
    pub total_current_value: Money,
    pub best_asset: Option<Symbol>,
    pub best_performance: Decimal,
    pub worst_asset: Option<Symbol>,
    pub worst_performance: Decimal,
    /// Priced positions, in input order. Unpriced ones are left out.
    pub positions: Vec<SimulatedPosition>,
}

impl ProfitSimulationResult {
    pub fn empty() -> Self {
        Self {
            total_current_value: Money::ZERO,
            best_asset: None,
            best_performance: Decimal::ZERO,
            worst_asset: None,
            worst_performance: Decimal::ZERO,
            positions: Vec::new(),
        }
    }
}
