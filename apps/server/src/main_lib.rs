use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use cryptowallet_core::{
    quotes::{PriceAggregator, PriceRefreshService, PriceRefreshServiceTrait},
    simulation::{ProfitSimulationService, ProfitSimulationServiceTrait},
    wallets::{WalletService, WalletServiceTrait},
};
use cryptowallet_market_data::{CoinCapProvider, QuoteSource};
use cryptowallet_storage_sqlite::{
    assets::AssetRepository,
    db::{self, write_actor},
    users::UserRepository,
};

use crate::config::Config;

pub struct AppState {
    pub wallet_service: Arc<dyn WalletServiceTrait>,
    pub simulation_service: Arc<dyn ProfitSimulationServiceTrait>,
    pub price_refresh_service: Arc<dyn PriceRefreshServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("CW_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Builds the application state against the CoinCap API.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let mut provider = CoinCapProvider::new(config.coincap_api_key.clone());
    if let Some(base_url) = &config.coincap_base_url {
        provider = provider.with_base_url(base_url.as_str());
    }
    tracing::info!(
        "Quote source: CoinCap ({})",
        if config.coincap_api_key.is_some() {
            "authenticated"
        } else {
            "anonymous"
        }
    );
    build_state_with_source(config, Arc::new(provider)).await
}

/// Builds the application state with the given quote source.
pub async fn build_state_with_source(
    config: &Config,
    quote_source: Arc<dyn QuoteSource>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let asset_repository = Arc::new(AssetRepository::new(pool.clone(), writer.clone()));

    let price_aggregator = Arc::new(PriceAggregator::new(quote_source));

    let wallet_service = WalletService::new(
        user_repository,
        asset_repository.clone(),
        price_aggregator.clone(),
    )
    .with_max_distinct_symbols(config.max_wallet_symbols);
    let simulation_service = ProfitSimulationService::new(price_aggregator.clone());
    let price_refresh_service = PriceRefreshService::new(asset_repository, price_aggregator);

    Ok(Arc::new(AppState {
        wallet_service: Arc::new(wallet_service),
        simulation_service: Arc::new(simulation_service),
        price_refresh_service: Arc::new(price_refresh_service),
    }))
}
