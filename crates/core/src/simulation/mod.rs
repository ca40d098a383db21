//! Hypothetical profit/loss over a basket of positions.

mod simulation_model;
mod simulation_service;


pub use simulation_model::{ProfitSimulationResult, SimulatedPosition, SimulationPosition};
pub use simulation_service::{ProfitSimulationService, ProfitSimulationServiceTrait};
