//! Background scheduler for periodic price refresh.
//!
//! Overwrites the stored price of every held symbol with the market price.

use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::main_lib::AppState;

/// Initial delay before the first refresh (lets the server finish starting)
const INITIAL_DELAY_SECS: u64 = 10;

/// Starts the background price refresh scheduler.
pub fn start_price_refresh_scheduler(state: Arc<AppState>, every: Duration) {
    tokio::spawn(async move {
        info!("Price refresh scheduler started ({:?} interval)", every);

        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        // First tick is immediate, later ticks are `every` apart
        let mut refresh_interval = interval(every);
        refresh_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            refresh_interval.tick().await;
            run_scheduled_refresh(&state).await;
        }
    });
}

/// Runs a single refresh; failures are logged and retried on the next tick.
pub async fn run_scheduled_refresh(state: &AppState) {
    debug!("Running scheduled price refresh");
    match state.price_refresh_service.refresh_all_prices().await {
        Ok(0) => debug!("Scheduled price refresh found nothing to update"),
        Ok(priced) => info!("Scheduled price refresh updated {} symbol(s)", priced),
        Err(e) => warn!("Scheduled price refresh failed: {}", e),
    }
}
