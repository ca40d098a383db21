use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};

use cryptowallet_core::errors::Error as CoreError;
use cryptowallet_core::simulation::SimulationPosition;
use cryptowallet_core::{Money, Quantity, Symbol};

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{SimulationRequest, SimulationResponse},
};

async fn simulate_profit(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SimulationRequest>,
) -> ApiResult<Json<SimulationResponse>> {
    let positions = body
        .assets
        .into_iter()
        .map(|input| -> Result<SimulationPosition, CoreError> {
            Ok(SimulationPosition::new(
                Symbol::new(&input.symbol)?,
                Quantity::new(input.quantity)?,
                Money::new(input.value)?,
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let result = state.simulation_service.simulate_profit(positions).await?;
    Ok(Json(SimulationResponse::from(result)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/profit-simulation", post(simulate_profit))
}
