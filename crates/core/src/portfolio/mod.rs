//! Portfolio valuation arithmetic.

pub mod calculator;

pub use calculator::{
    best_performing, current_value, is_valid_simulation_input, merge_cost_basis, price_per_unit,
    profit_loss_percent, total_portfolio_value, worst_performing,
};
